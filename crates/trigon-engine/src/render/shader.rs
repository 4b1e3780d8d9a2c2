use std::borrow::Cow;

/// Opaque WGSL text plus the entry points the driver links against.
///
/// The source is never parsed or validated here; wgpu reports shader errors
/// through its own validation layer when the module is created.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: Cow<'static, str>,
    pub code: Cow<'static, str>,
    pub vertex_entry: Cow<'static, str>,
    pub fragment_entry: Cow<'static, str>,
    pub alternate_fragment_entry: Cow<'static, str>,
}

impl ShaderSource {
    /// Wraps `code` using the conventional entry point names
    /// (`vs_main`, `fs_main`, `second_fs_main`).
    pub fn wgsl(code: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: Cow::Borrowed("trigon shader"),
            code: code.into(),
            vertex_entry: Cow::Borrowed("vs_main"),
            fragment_entry: Cow::Borrowed("fs_main"),
            alternate_fragment_entry: Cow::Borrowed("second_fs_main"),
        }
    }

    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_fragment_entries(
        mut self,
        default: impl Into<Cow<'static, str>>,
        alternate: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.fragment_entry = default.into();
        self.alternate_fragment_entry = alternate.into();
        self
    }
}
