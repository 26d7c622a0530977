mod common;
mod dysphoria;
mod routing;
mod service;
