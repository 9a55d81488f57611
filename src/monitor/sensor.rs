/// A single reading reported by one physical sensor.
///
/// Immutable after construction. A machine keeps at most one `Sensor`
/// per kind, so the loader may build these freely and let the machine
/// decide which one survives.
#[derive(Debug, Clone)]
pub struct Sensor {
    id: String,
    kind: String,
    reading: f64,
}

impl Sensor {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, reading: f64) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            reading,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The sensor kind, e.g. "Temperature". Open set; scoring only
    /// recognizes the three required kinds.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn reading(&self) -> f64 {
        self.reading
    }
}
