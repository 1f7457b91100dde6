use serde::{Deserialize, Serialize};

use crate::error::TransmitError;

/// One timestamped observation for one patient.
///
/// Field names on the wire follow the backend's schema; the declaration order
/// here is the order they appear in every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    /// Copied from the source as-is, never reparsed.
    pub timestamp: String,
    #[serde(rename = "paciente_id")]
    pub patient_id: String,
    #[serde(rename = "paciente_nome")]
    pub patient_name: String,
    #[serde(rename = "paciente_cpf")]
    pub patient_cpf: String,
    #[serde(rename = "freq_cardiaca")]
    pub heart_rate: i64,
    #[serde(rename = "saturacao_o2")]
    pub oxygen_saturation: i64,
    #[serde(rename = "pressao_sistolica")]
    pub systolic_pressure: i64,
    #[serde(rename = "pressao_diastolica")]
    pub diastolic_pressure: i64,
    #[serde(rename = "temperatura")]
    pub temperature: f64,
    #[serde(rename = "freq_respiratoria")]
    pub respiratory_rate: i64,
    pub status: String,
}

impl VitalReading {
    /// Encode as one text frame.
    pub fn to_frame(&self) -> Result<String, TransmitError> {
        // serde_json would quietly write `null` here; the backend expects a number.
        if !self.temperature.is_finite() {
            return Err(TransmitError::NonFiniteTemperature(self.temperature));
        }
        Ok(serde_json::to_string(self)?)
    }
}
