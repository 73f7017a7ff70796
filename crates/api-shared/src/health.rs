use crate::responses::HealthRes;

/// Simple health service for the doclist HTTP surface
///
/// Reports liveness together with whether the doctor directory has finished loading.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance
    ///
    /// # Arguments
    /// * `loading` - whether the directory fetch is still pending
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is alive.
    pub fn check_health(loading: bool) -> HealthRes {
        HealthRes {
            ok: true,
            loading,
            message: if loading {
                "doclist is alive; directory loading".into()
            } else {
                "doclist is alive".into()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_reports_loading_state() {
        let res = HealthService::check_health(true);
        assert!(res.ok);
        assert!(res.loading);
        assert!(res.message.contains("loading"));

        let res = HealthService::check_health(false);
        assert!(!res.loading);
        assert_eq!(res.message, "doclist is alive");
    }
}
