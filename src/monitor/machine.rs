use std::collections::HashMap;

use super::sensor::Sensor;

/// Sensor kinds every machine is scored against, in scoring order.
static REQUIRED_KINDS: &[&str] = &["Temperature", "Pressure", "Vibration"];

/// Warning emitted once per required kind with no reading.
pub const SENSOR_OFFLINE_WARNING: &str = "Sensor Offline Warning";

/// A machine under observation: the latest reading per sensor kind.
#[derive(Debug, Clone)]
pub struct Machine {
    id: String,
    sensors: HashMap<String, Sensor>,
}

impl Machine {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sensors: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sensors(&self) -> &HashMap<String, Sensor> {
        &self.sensors
    }

    /// Registers a sensor under its kind. A later sensor of the same kind
    /// replaces the earlier one silently.
    pub fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.insert(sensor.kind().to_string(), sensor);
    }

    /// Scores the machine against the required sensor kinds.
    ///
    /// A missing required kind contributes a reading of zero and adds one
    /// [`SENSOR_OFFLINE_WARNING`] to the returned warnings, in scoring
    /// order. The score is `100 - (temperature/2 + pressure/10 +
    /// vibration*20)`, unbounded in both directions with no clamping.
    pub fn compute_health(&self) -> (f64, Vec<String>) {
        let mut warnings = Vec::new();

        let temperature = self.required_reading(REQUIRED_KINDS[0], &mut warnings);
        let pressure = self.required_reading(REQUIRED_KINDS[1], &mut warnings);
        let vibration = self.required_reading(REQUIRED_KINDS[2], &mut warnings);

        let health = 100.0 - (temperature / 2.0 + pressure / 10.0 + vibration * 20.0);
        (health, warnings)
    }

    fn required_reading(&self, kind: &str, warnings: &mut Vec<String>) -> f64 {
        match self.sensors.get(kind) {
            Some(sensor) => sensor.reading(),
            None => {
                warnings.push(SENSOR_OFFLINE_WARNING.to_string());
                0.0
            }
        }
    }
}
