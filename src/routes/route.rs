use actix_web::web;

use crate::controller::generate_name;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_name);
}
