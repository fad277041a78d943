use rocket::{catch, Request};

use crate::config::ArcadeConfig;

#[catch(500)]
pub fn internal_error(request: &Request<'_>) -> String {
    let debug = request
        .rocket()
        .state::<ArcadeConfig>()
        .map_or(false, |config| config.debug);

    if debug {
        format!(
            "internal server error while handling {} {}",
            request.method(),
            request.uri()
        )
    } else {
        "internal server error".to_owned()
    }
}
