use crate::dto::HealthRes;

/// Health check shared by every API surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Report the service as alive.
    ///
    /// The mock service has no dependencies to probe, so this never fails.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Clinic portal is alive".into(),
        }
    }
}
