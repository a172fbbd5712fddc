//! factordb.com client

use std::time::Duration;

use num_bigint::BigInt;
use serde::Deserialize;

use super::{FactorOracle, FactorStatus, OracleError, PrimeFactorization};
use crate::math::parse_integer;

pub const DEFAULT_ORACLE_URL: &str = "http://factordb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`FactorDb`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Ask the service to factor an unresolved number and query once more.
    pub retry_unresolved: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORACLE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_unresolved: true,
        }
    }
}

/// JSON body of `GET /api?query=N`.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    factors: Vec<(String, u32)>,
}

/// Blocking factordb client.
pub struct FactorDb {
    config: OracleConfig,
    agent: ureq::Agent,
}

impl FactorDb {
    pub fn new(config: OracleConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    fn api_url(&self) -> String {
        format!("{}/api", self.config.base_url.trim_end_matches('/'))
    }

    fn query(&self, n: &BigInt) -> Result<PrimeFactorization, OracleError> {
        log::info!("querying {} for a {}-bit modulus", self.config.base_url, n.bits());
        let body = self
            .agent
            .get(&self.api_url())
            .query("query", &n.to_string())
            .call()
            .map_err(map_ureq_error)?
            .into_string()
            .map_err(map_io_error)?;
        parse_response(&body)
    }

    /// Loading the web page for a number makes factordb run its own
    /// trial division and ECM on it.
    fn request_factorization(&self, n: &BigInt) -> Result<(), OracleError> {
        let url = format!("{}/index.php", self.config.base_url.trim_end_matches('/'));
        self.agent
            .get(&url)
            .query("query", &n.to_string())
            .call()
            .map_err(map_ureq_error)?;
        Ok(())
    }
}

impl FactorOracle for FactorDb {
    fn factorize(&self, n: &BigInt) -> Result<PrimeFactorization, OracleError> {
        let first = self.query(n)?;
        if first.status == FactorStatus::Complete || !self.config.retry_unresolved {
            return Ok(first);
        }

        log::warn!("factordb has no full factorization yet, requesting one and retrying");
        self.request_factorization(n)?;
        self.query(n)
    }
}

fn parse_response(body: &str) -> Result<PrimeFactorization, OracleError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| OracleError::Malformed(e.to_string()))?;

    let status = match response.status.as_str() {
        "FF" | "P" | "PRP" => FactorStatus::Complete,
        _ => FactorStatus::Unresolved,
    };

    let factors = response
        .factors
        .into_iter()
        .map(|(p, k)| {
            parse_integer(&p)
                .map(|p| (p, k))
                .ok_or_else(|| OracleError::Malformed(format!("factor {p:?} is not an integer")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("factordb status {} with {} distinct factors", response.status, factors.len());
    Ok(PrimeFactorization { factors, status })
}

fn map_ureq_error(err: ureq::Error) -> OracleError {
    match err {
        ureq::Error::Status(code, _) => OracleError::Unavailable(format!("HTTP status {code}")),
        ureq::Error::Transport(transport) => {
            let timed_out = std::error::Error::source(&transport)
                .and_then(|source| source.downcast_ref::<std::io::Error>())
                .is_some_and(is_timeout);
            if timed_out {
                OracleError::Timeout
            } else {
                OracleError::Unavailable(transport.to_string())
            }
        }
    }
}

fn map_io_error(err: std::io::Error) -> OracleError {
    if is_timeout(&err) {
        OracleError::Timeout
    } else {
        OracleError::Unavailable(err.to_string())
    }
}

fn is_timeout(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fully_factored() {
        let body = r#"{"id":"1100000000000123456","status":"FF","factors":[["53",1],["61",1]]}"#;
        let f = parse_response(body).unwrap();
        assert_eq!(f.status, FactorStatus::Complete);
        assert_eq!(f.product(), BigInt::from(3233));
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_parse_prime_power() {
        let body = r#"{"id":"8","status":"FF","factors":[["2",3]]}"#;
        let f = parse_response(body).unwrap();
        assert_eq!(f.factors, vec![(BigInt::from(2), 3)]);
    }

    #[test]
    fn test_parse_unresolved_composite() {
        let body = r#"{"id":"1","status":"C","factors":[["1522605027922533360535618378132637429718068114961380688657908494580122963258952897654000350692006139",1]]}"#;
        let f = parse_response(body).unwrap();
        assert_eq!(f.status, FactorStatus::Unresolved);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_response("<html>"), Err(OracleError::Malformed(_))));
        let body = r#"{"id":"1","status":"FF","factors":[["sixty-one",1]]}"#;
        assert!(matches!(parse_response(body), Err(OracleError::Malformed(_))));
    }

    #[test]
    fn test_default_config() {
        let config = OracleConfig::default();
        assert_eq!(config.base_url, DEFAULT_ORACLE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.retry_unresolved);
    }

    #[test]
    fn test_unreachable_host_is_unavailable() {
        // Port 9 on localhost is the discard service and normally closed.
        let db = FactorDb::new(OracleConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
            retry_unresolved: false,
        });
        let err = db.factorize(&BigInt::from(3233)).unwrap_err();
        assert!(matches!(err, OracleError::Unavailable(_) | OracleError::Timeout));
    }
}
