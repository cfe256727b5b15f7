/// A named numeric constant. `NaN` marks a value that is intentionally unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
}

impl Parameter {
    pub(crate) fn new(name: &str, value: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            value: value.unwrap_or(f64::NAN),
        }
    }

    pub fn is_set(&self) -> bool {
        !self.value.is_nan()
    }
}
