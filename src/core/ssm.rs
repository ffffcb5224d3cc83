use aws_sdk_ssm::Client as SsmClient;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;

use crate::errors::SummaryError;

/// Reads one SSM parameter. `Ok(None)` when it does not exist.
///
/// # Errors
///
/// Returns [`SummaryError::Storage`] for any other SSM failure.
pub async fn get_parameter(
    client: &SsmClient,
    name: &str,
    with_decryption: bool,
) -> Result<Option<String>, SummaryError> {
    match client
        .get_parameter()
        .name(name)
        .with_decryption(with_decryption)
        .send()
        .await
    {
        Ok(resp) => Ok(resp
            .parameter
            .and_then(|param| param.value)
            .filter(|value| !value.is_empty())),
        Err(e) => {
            let not_found = e
                .as_service_error()
                .is_some_and(GetParameterError::is_parameter_not_found);
            if not_found {
                Ok(None)
            } else {
                Err(SummaryError::Storage(format!("ssm get_parameter {name}: {e}")))
            }
        }
    }
}

/// Joins a parameter prefix and a key, inserting the `/` separator if needed.
#[must_use]
pub fn parameter_name(prefix: &str, key: &str) -> String {
    let mut p = prefix.to_string();
    if !p.ends_with('/') {
        p.push('/');
    }
    format!("{p}{key}")
}
