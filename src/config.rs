/// What to do when a symbol occurs more often than a table entry can record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Rescale every count into the field's range, keeping their order.
    #[default]
    Scale,
    /// Refuse the input with a capacity error.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub overflow: OverflowPolicy,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self::new().with_overflow(OverflowPolicy::Strict)
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}
