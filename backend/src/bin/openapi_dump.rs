//! Print the OpenAPI document as JSON.

use registration_backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() {
    println!("{}", ApiDoc::openapi().to_json().unwrap());
}
