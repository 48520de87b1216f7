use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, SignupRequest},
        cart::{AddToCartRequest, Cart, CartView},
        products::{CreateProductRequest, DeletedProduct, ProductList, UpdateProductRequest},
        users::UserList,
    },
    models::{CartEntry, CartLine, Product, Role, UserProfile},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, health, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        auth::profile,
        products::list_products,
        cart::view_cart,
        cart::add_to_cart,
        admin::list_users,
        admin::add_product,
        admin::update_product,
        admin::delete_product
    ),
    components(
        schemas(
            Role,
            UserProfile,
            UserList,
            CartLine,
            CartEntry,
            Cart,
            CartView,
            Product,
            ProductList,
            DeletedProduct,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            CreateProductRequest,
            UpdateProductRequest,
            Meta,
            ApiResponse<UserProfile>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Cart>,
            ApiResponse<CartView>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup, login and profile"),
        (name = "Products", description = "Product catalog"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Admin", description = "Admin-only user and product management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
