pub mod echo;
pub mod health;
pub mod semantic;
pub mod vector_search;

pub use echo::http_example;
pub use health::health_handler;
pub use semantic::vector_similarity_search_semantic_reranking;
pub use vector_search::vector_similarity_search;

use actix_web::web;

/// Function routes. Each accepts GET and POST.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/HttpExample2")
            .route(web::get().to(http_example))
            .route(web::post().to(http_example)),
    )
    .service(
        web::resource("/vector_similarity_search")
            .route(web::get().to(vector_similarity_search))
            .route(web::post().to(vector_similarity_search)),
    )
    .service(
        web::resource("/vector_similarity_search_semantic_reranking")
            .route(web::get().to(vector_similarity_search_semantic_reranking))
            .route(web::post().to(vector_similarity_search_semantic_reranking)),
    );
}
