pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod render;
pub mod pages;

pub mod models {
    pub mod note;
    pub mod session;
}

pub mod services {
    pub mod notes;
    pub mod session;
}

pub mod handlers {
    pub mod auth;
    pub mod notes;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod notes;
}
