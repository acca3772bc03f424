/// Whether `final` instance fields may be written through field access.
/// `static final` fields are constants and never writable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalFieldPolicy {
    /// Instance finals get a write accessor like any other field.
    #[default]
    Settable,
    /// Every `final` field is read-only.
    ReadOnly,
}

/// Settings shared by every descriptor a `Reflector` builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectorConfig {
    /// Stripped from caller-supplied names when normalization is requested,
    /// so `order_date` matches `orderDate`.
    pub separator:    char,
    pub final_fields: FinalFieldPolicy,
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        Self { separator: '_', final_fields: FinalFieldPolicy::default() }
    }
}

impl ReflectorConfig {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_final_fields(mut self, policy: FinalFieldPolicy) -> Self {
        self.final_fields = policy;
        self
    }

    /// Whether a field with these modifiers can get a write accessor.
    pub fn is_field_settable(&self, is_final: bool, is_static: bool) -> bool {
        match (is_final, is_static, self.final_fields) {
            (true, true, _)                          => false,
            (true, false, FinalFieldPolicy::ReadOnly) => false,
            _                                        => true,
        }
    }
}
