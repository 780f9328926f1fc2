use uuid::Uuid;

/// Correlation ID that follows one navigation attempt or auth flow
#[derive(Clone, Debug)]
pub struct TraceId {
    id: Uuid,
    text: String,
}

impl TraceId {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn uuid(&self) -> Uuid {
        self.id
    }
}

impl Default for TraceId {
    fn default() -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            text: id.as_hyphenated().to_string(),
        }
    }
}
