use axum_helpers::AdminAllowlist;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_projects::{RevalidateConfig, SupabaseConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
///
/// Everything is loaded once at startup; a missing required variable
/// fails the boot instead of a request later.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub supabase: SupabaseConfig,
    pub revalidate: RevalidateConfig,
    pub admins: AdminAllowlist,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL not set
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=8080
        let supabase = SupabaseConfig::from_env()?; // Required - storage credentials
        let revalidate = RevalidateConfig::from_env(); // Optional - skipped when unset
        let admins = AdminAllowlist::from_env()?; // Required - ADMIN_EMAILS

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            supabase,
            revalidate,
            admins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_vars() -> [(&'static str, Option<&'static str>); 5] {
        [
            ("DATABASE_URL", Some("postgresql://localhost/portfolio")),
            ("SUPABASE_URL", Some("https://xyz.supabase.co")),
            ("SUPABASE_SERVICE_ROLE_KEY", Some("service-key")),
            ("ADMIN_EMAILS", Some("admin@example.com")),
            ("REVALIDATE_ENDPOINT", None),
        ]
    }

    #[test]
    fn from_env_with_required_vars() {
        temp_env::with_vars(required_vars(), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "portfolio_api");
            assert_eq!(config.server.port, 8080);
            assert!(config.admins.is_allowed("admin@example.com"));
            assert!(config.revalidate.endpoint.is_none());
        });
    }

    #[test]
    fn from_env_fails_without_admins() {
        let mut vars = required_vars().to_vec();
        vars.retain(|(key, _)| *key != "ADMIN_EMAILS");
        vars.push(("ADMIN_EMAILS", None));

        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }
}
