use crate::wire::HealthRes;

/// Simple health service shared by the REST server and its tests
///
/// Provides a standardised way to check the health status of the collection service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "NeoLung collection service is alive".into(),
        }
    }
}
