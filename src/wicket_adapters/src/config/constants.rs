pub mod env {
    pub const CONFIG_ENV_PREFIX: &str = "WICKET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
}

pub const CONFIG_FILE_NAME: &str = "wicket";
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "wicket_session";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
