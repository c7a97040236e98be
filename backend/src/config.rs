//! Runtime configuration, read from the environment once at startup.
//!
//! ERP credentials and resource URLs come from `CERM_*` variables (a `.env`
//! file is honored). URLs default to the production parameter API so a
//! deployment only has to provide credentials; missing credentials are a
//! warning here and an error response at call time, never a panic.

use log::warn;
use std::env;

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database holding the cutting die catalog and stored quotes.
    pub database_path: String,
    /// Fixed customer/contact identifiers stamped on every order payload.
    pub customer_id: String,
    pub contact_id: String,
    pub erp: ErpConfig,
}

#[derive(Clone)]
pub struct ErpConfig {
    pub oauth_url: String,
    pub color_codes_url: String,
    pub finishing_types_url: String,
    pub materials_url: String,
    pub order_url: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = var_or("PORT", "8080").parse().unwrap_or(8080);
        AppConfig {
            host: var_or("HOST", "127.0.0.1"),
            port,
            database_path: var_or("DATABASE_PATH", "wiselabels.sqlite"),
            customer_id: var_or("CERM_CUSTOMER_ID", "108620"),
            contact_id: var_or("CERM_CONTACT_ID", "001"),
            erp: ErpConfig::from_env(),
        }
    }
}

impl ErpConfig {
    pub fn from_env() -> Self {
        let config = ErpConfig {
            oauth_url: var_or("CERM_OAUTH_URL", "https://brandmark-api.cerm.be/oauth/token"),
            color_codes_url: var_or(
                "CERM_COLOR_CODES_URL",
                "https://brandmark-api.cerm.be/parameter-api/v1/calculation/quick-quote/colour-codes",
            ),
            finishing_types_url: var_or(
                "CERM_FINISHING_TYPES_URL",
                "https://brandmark-api.cerm.be/parameter-api/v1/calculation/quick-quote/finishing-types",
            ),
            materials_url: var_or(
                "CERM_MATERIALS_URL",
                "https://brandmark-api.cerm.be/parameter-api/v1/calculation/quick-quote/substrates",
            ),
            order_url: var_or(
                "CERM_ORDER_URL",
                "https://brandmark-api.cerm.be/quote-api/v1/quick-quote/orders",
            ),
            username: var_or("CERM_USERNAME", ""),
            password: var_or("CERM_PASSWORD", ""),
            client_id: var_or("CERM_CLIENT_ID", ""),
            client_secret: var_or("CERM_CLIENT_SECRET", ""),
        };
        if !config.credentials_configured() {
            warn!("CERM API credentials are not fully configured; reference lookups and order submission will fail");
        }
        config
    }

    pub fn credentials_configured(&self) -> bool {
        !self.username.is_empty()
            && !self.password.is_empty()
            && !self.client_id.is_empty()
            && !self.client_secret.is_empty()
    }
}
