pub fn default_version() -> u32 {
    1
}

pub fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

pub fn default_endpoint() -> String {
    "/create-plan".to_string()
}

pub fn default_completion_delay_ms() -> u64 {
    500
}

pub fn default_tick_ms() -> u64 {
    100
}
