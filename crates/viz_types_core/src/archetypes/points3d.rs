use crate::components::{Color, Position3D, Radius, Text};
use crate::{
    Archetype, ArchetypeName, AsComponents, Collection, Component as _, ComponentBatch,
    ComponentDescriptor, SerializationContext, SerializationResult,
};

/// A batch of 3D points, optionally with radii, colors and labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Points3D {
    /// All the 3D positions at which the point cloud shows points.
    pub positions: Vec<Position3D>,

    /// Optional radii for the points, effectively turning them into circles.
    pub radii: Option<Vec<Radius>>,

    /// Optional colors for the points.
    pub colors: Option<Vec<Color>>,

    /// Optional text labels for the points.
    pub labels: Option<Vec<Text>>,
}

impl Points3D {
    #[inline]
    pub fn new(positions: impl IntoIterator<Item = impl Into<Position3D>>) -> Self {
        Self {
            positions: positions.into_iter().map(Into::into).collect(),
            radii: None,
            colors: None,
            labels: None,
        }
    }

    #[inline]
    pub fn with_radii(mut self, radii: impl IntoIterator<Item = impl Into<Radius>>) -> Self {
        self.radii = Some(radii.into_iter().map(Into::into).collect());
        self
    }

    #[inline]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = impl Into<Color>>) -> Self {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    #[inline]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<Text>>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the descriptor of the `positions` field.
    #[inline]
    pub fn descriptor_positions() -> ComponentDescriptor {
        Position3D::descriptor().with_archetype(Self::name(), "positions")
    }

    /// Returns the descriptor of the `radii` field.
    #[inline]
    pub fn descriptor_radii() -> ComponentDescriptor {
        Radius::descriptor().with_archetype(Self::name(), "radii")
    }

    /// Returns the descriptor of the `colors` field.
    #[inline]
    pub fn descriptor_colors() -> ComponentDescriptor {
        Color::descriptor().with_archetype(Self::name(), "colors")
    }

    /// Returns the descriptor of the `labels` field.
    #[inline]
    pub fn descriptor_labels() -> ComponentDescriptor {
        Text::descriptor().with_archetype(Self::name(), "labels")
    }
}

impl Archetype for Points3D {
    #[inline]
    fn name() -> ArchetypeName {
        "viz.archetypes.Points3D".into()
    }

    #[inline]
    fn display_name() -> &'static str {
        "Points 3D"
    }
}

impl AsComponents for Points3D {
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        let Self {
            positions,
            radii,
            colors,
            labels,
        } = self;

        let mut batches = Vec::with_capacity(5);

        // Declared field order, with absent optional fields skipped entirely.
        // An empty `Some(vec![])` still produces a (zero-length) batch: that is
        // the caller asking for the component to be cleared.
        batches.push(ComponentBatch::from_collection_with_descriptor(
            &Collection::borrowed(positions),
            Self::descriptor_positions(),
            ctx,
        )?);

        if let Some(radii) = radii {
            batches.push(ComponentBatch::from_collection_with_descriptor(
                &Collection::borrowed(radii),
                Self::descriptor_radii(),
                ctx,
            )?);
        }

        if let Some(colors) = colors {
            batches.push(ComponentBatch::from_collection_with_descriptor(
                &Collection::borrowed(colors),
                Self::descriptor_colors(),
                ctx,
            )?);
        }

        if let Some(labels) = labels {
            batches.push(ComponentBatch::from_collection_with_descriptor(
                &Collection::borrowed(labels),
                Self::descriptor_labels(),
                ctx,
            )?);
        }

        // The indicator comes last and covers as many rows as there are points.
        batches.push(Self::indicator(positions.len()).to_batch(ctx)?);

        Ok(batches)
    }
}

// ---

#[cfg(test)]
mod tests {
    use arrow::array::Array as _;
    use arrow::datatypes::DataType;

    use crate::testing::SequentialRegistrar;
    use crate::components::{Color, Radius};
    use crate::{ComponentTypeRegistry, GenericIndicatorComponent};

    use super::*;

    #[test]
    fn field_order_and_indicator() {
        let registry = ComponentTypeRegistry::new();
        let registrar = SequentialRegistrar::default();
        let ctx = SerializationContext::new(&registry, &registrar);

        let points = Points3D::new([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)])
            .with_radii([0.5, 0.5, 0.5])
            .with_colors([Color::from_rgb(255, 0, 0); 3]);

        let batches = points.as_component_batches(&ctx).unwrap();

        // positions, radii, colors (labels absent), then the indicator.
        assert_eq!(batches.len(), 4);
        assert_eq!(batches[0].descriptor(), &Points3D::descriptor_positions());
        assert_eq!(batches[1].descriptor(), &Points3D::descriptor_radii());
        assert_eq!(batches[2].descriptor(), &Points3D::descriptor_colors());
        assert_eq!(
            batches[3].descriptor(),
            &GenericIndicatorComponent::<Points3D>::descriptor()
        );

        for batch in &batches {
            assert_eq!(batch.len(), 3);
        }
    }

    #[test]
    fn indicator_mirrors_instance_count() {
        let registry = ComponentTypeRegistry::new();
        let registrar = SequentialRegistrar::default();
        let ctx = SerializationContext::new(&registry, &registrar);

        let batches = Points3D::new([(0.0, 0.0, 0.0), (1.0, 2.0, 3.0)])
            .as_component_batches(&ctx)
            .unwrap();

        assert_eq!(batches.len(), 2); // positions + indicator
        let indicator = batches.last().unwrap();
        assert_eq!(indicator.len(), 2);
        assert_eq!(indicator.array().unwrap().data_type(), &DataType::Null);
    }

    #[test]
    fn empty_optional_field_is_a_clear_not_an_absence() {
        let registry = ComponentTypeRegistry::new();
        let registrar = SequentialRegistrar::default();
        let ctx = SerializationContext::new(&registry, &registrar);

        let cleared = Points3D::new([(0.0, 0.0, 0.0)]).with_radii(Vec::<Radius>::new());
        let batches = cleared.as_component_batches(&ctx).unwrap();

        // positions, an empty radii batch, indicator.
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[1].descriptor(), &Points3D::descriptor_radii());
        assert!(batches[1].is_empty());
    }
}
