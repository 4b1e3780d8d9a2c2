/// Which of the two pipelines renders the triangle.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Default,
    Alternate,
}

impl Mode {
    #[inline]
    pub fn from_active(alternate_active: bool) -> Self {
        if alternate_active { Mode::Alternate } else { Mode::Default }
    }
}
