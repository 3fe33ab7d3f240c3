use crate::components::Text;
use crate::{
    Archetype, ArchetypeName, AsComponents, Collection, Component as _, ComponentBatch,
    ComponentDescriptor, SerializationContext, SerializationResult,
};

/// A log entry in a text log, comprised of a text body and an optional level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLog {
    /// The body of the message.
    pub text: Text,

    /// The verbosity level of the message, e.g. `INFO` or `ERROR`.
    pub level: Option<Text>,
}

impl TextLog {
    #[inline]
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            text: text.into(),
            level: None,
        }
    }

    #[inline]
    pub fn with_level(mut self, level: impl Into<Text>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Returns the descriptor of the `text` field.
    #[inline]
    pub fn descriptor_text() -> ComponentDescriptor {
        Text::descriptor().with_archetype(Self::name(), "text")
    }

    /// Returns the descriptor of the `level` field.
    #[inline]
    pub fn descriptor_level() -> ComponentDescriptor {
        Text::descriptor().with_archetype(Self::name(), "level")
    }
}

impl Archetype for TextLog {
    #[inline]
    fn name() -> ArchetypeName {
        "viz.archetypes.TextLog".into()
    }

    #[inline]
    fn display_name() -> &'static str {
        "Text log"
    }
}

impl AsComponents for TextLog {
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        let Self { text, level } = self;

        let mut batches = Vec::with_capacity(3);

        batches.push(ComponentBatch::from_collection_with_descriptor(
            &Collection::borrowed(std::slice::from_ref(text)),
            Self::descriptor_text(),
            ctx,
        )?);

        if let Some(level) = level {
            batches.push(ComponentBatch::from_collection_with_descriptor(
                &Collection::borrowed(std::slice::from_ref(level)),
                Self::descriptor_level(),
                ctx,
            )?);
        }

        batches.push(Self::indicator(1).to_batch(ctx)?);

        Ok(batches)
    }
}

// ---

#[cfg(test)]
mod tests {
    use crate::testing::SequentialRegistrar;
    use crate::{ComponentTypeRegistry, GenericIndicatorComponent};

    use super::*;

    #[test]
    fn level_is_optional() {
        let registry = ComponentTypeRegistry::new();
        let registrar = SequentialRegistrar::default();
        let ctx = SerializationContext::new(&registry, &registrar);

        let bare = TextLog::new("Application started.");
        let batches = bare.as_component_batches(&ctx).unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].descriptor(), &TextLog::descriptor_text());

        let leveled = TextLog::new("Application started.").with_level("INFO");
        let batches = leveled.as_component_batches(&ctx).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[1].descriptor(), &TextLog::descriptor_level());
        assert_eq!(
            batches[2].descriptor(),
            &GenericIndicatorComponent::<TextLog>::descriptor()
        );
    }
}
