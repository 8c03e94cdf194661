//! App Router

use salvo::Router;

use crate::{analytics, auth, healthcheck, observability::metrics_handler, qr_codes, scans};

/// Routes served by the API. Scanning is public; everything else needs an advertiser token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("scan").post(scans::create::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("qr-codes")
                        .post(qr_codes::generate::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(qr_codes::get::handler)
                                .push(
                                    Router::with_path("deactivate")
                                        .post(qr_codes::deactivate::handler),
                                ),
                        ),
                )
                .push(Router::with_path("analytics").get(analytics::get::handler)),
        )
}
