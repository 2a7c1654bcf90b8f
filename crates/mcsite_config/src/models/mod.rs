pub mod logging;
pub mod site;
pub mod status;
pub mod webhook;
