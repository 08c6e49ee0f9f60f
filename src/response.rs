use crate::constants::{DEST_KEY, ERROR_KEY, ERROR_LONG_KEY};
use crate::error::{OptimizerError, Result};
use crate::transport::RawResponse;
use serde_json::{Map, Value};

/// A successful answer from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSuccess {
    pub dest: String,
    pub src_size: Option<u64>,
    pub dest_size: Option<u64>,
    pub percent: Option<f64>,
    pub expires: Option<String>,
}

/// The service response, parsed once right after the body arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    Success(ServiceSuccess),
    Failure { message: String },
    Malformed { reason: String },
}

impl ServiceResponse {
    pub fn parse(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                return ServiceResponse::Malformed {
                    reason: format!("response is not valid JSON: {}", e),
                }
            }
        };

        let map = match value {
            Value::Object(map) => map,
            other => {
                return ServiceResponse::Malformed {
                    reason: format!("expected a JSON object, got {}", json_kind(&other)),
                }
            }
        };

        // A non-null error key wins over everything else in the body
        if let Some(error) = map.get(ERROR_KEY).filter(|v| !v.is_null()) {
            return ServiceResponse::Failure {
                message: error_message(error, map.get(ERROR_LONG_KEY)),
            };
        }

        match map.get(DEST_KEY) {
            Some(Value::String(dest)) if !dest.trim().is_empty() => {
                ServiceResponse::Success(ServiceSuccess {
                    dest: dest.trim().to_string(),
                    src_size: get_u64(&map, "src_size"),
                    dest_size: get_u64(&map, "dest_size"),
                    percent: map.get("percent").and_then(Value::as_f64),
                    expires: map
                        .get("expires")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            }
            Some(other) => ServiceResponse::Malformed {
                reason: format!("'{}' is not a usable URL: {}", DEST_KEY, other),
            },
            None => ServiceResponse::Malformed {
                reason: format!("response has neither '{}' nor '{}'", ERROR_KEY, DEST_KEY),
            },
        }
    }

    /// Converts the parsed response into the caller-facing result.
    pub fn into_result(self) -> Result<ServiceSuccess> {
        match self {
            ServiceResponse::Success(success) => Ok(success),
            ServiceResponse::Failure { message } => Err(OptimizerError::Service(message)),
            ServiceResponse::Malformed { reason } => Err(OptimizerError::MalformedResponse(reason)),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ServiceResponse::Failure { .. })
    }
}

/// Interprets the submit round-trip.
///
/// A non-2xx status is only reported as a service error when the body carries
/// one; any other non-2xx status is a transport failure.
pub fn interpret_response(raw: &RawResponse) -> Result<ServiceSuccess> {
    let parsed = ServiceResponse::parse(&raw.body);

    if !raw.is_success() && !parsed.is_failure() {
        return Err(OptimizerError::transport(
            "submitting image",
            format!("server status {}", raw.status),
        ));
    }

    parsed.into_result()
}

fn error_message(error: &Value, long: Option<&Value>) -> String {
    let long = long.and_then(Value::as_str).filter(|s| !s.is_empty());
    match (error, long) {
        (Value::String(message), _) => message.clone(),
        (Value::Number(code), Some(long)) => format!("{} ({})", long, code),
        (Value::Number(code), None) => format!("error code {}", code),
        (other, Some(long)) => format!("{} ({})", long, other),
        (other, None) => other.to_string(),
    }
}

fn get_u64(map: &Map<String, Value>, key: &str) -> Option<u64> {
    match map.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
