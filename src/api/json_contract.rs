use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::XAxis;

pub const XAXIS_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisConfigJsonContractV1 {
    pub schema_version: u32,
    pub axis: XAxis,
}

impl XAxis {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize x axis json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = XAxisConfigJsonContractV1 {
            schema_version: XAXIS_CONFIG_JSON_SCHEMA_V1,
            axis: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize x axis contract v1: {e}"))
        })
    }

    /// Parses either a versioned contract payload or a bare axis object,
    /// then validates the result.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse x axis json payload: {e}"))
        })?;

        let axis = if value.get("schema_version").is_some() {
            let payload: XAxisConfigJsonContractV1 =
                serde_json::from_value(value).map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse x axis contract: {e}"))
                })?;
            if payload.schema_version != XAXIS_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported x axis schema version: {}",
                    payload.schema_version
                )));
            }
            payload.axis
        } else {
            serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse x axis json: {e}"))
            })?
        };

        axis.validate()?;
        Ok(axis)
    }
}
