use bizmodel_macro::entity;

/// Lightweight reference to another record: its id plus the code and name
/// shown to users.
#[entity(module = "core")]
pub struct Info {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl Info {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            code: Some(code.into()),
            name: Some(name.into()),
        }
    }
}
