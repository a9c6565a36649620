use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::auth::{jwt, password};
use crate::db::{profiles as profile_db, users as user_db};
use crate::models::users::{AuthResponse, LoginUser, RegisterUser, UserResponse};

/// POST /api/auth/register — create the identity, then its profile.
///
/// The two inserts are deliberately explicit and sequential: a user row
/// never exists without its marketplace profile.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<RegisterUser>,
) -> impl Responder {
    let input = body.into_inner();

    if input.username.trim().is_empty() || input.password.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Username and password are required",
        }));
    }

    // Reject duplicate usernames/emails up front for a friendly error;
    // the unique constraints still backstop races.
    match user_db::get_user_by_username(db.get_ref(), &input.username).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Username already exists",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }
    match user_db::get_user_by_email(db.get_ref(), &input.email).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Email already registered",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    let password_hash = match password::hash_password(&input.password) {
        Ok(h) => h,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e,
            }));
        }
    };

    let user = match user_db::insert_user(
        db.get_ref(),
        input.username,
        input.email,
        password_hash,
    )
    .await
    {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create user: {e}"),
            }));
        }
    };

    if let Err(e) =
        profile_db::insert_profile(db.get_ref(), user.id, input.role, input.display_name).await
    {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create profile: {e}"),
        }));
    }

    let token = match jwt::create_token(user.id, &user.username, &secret.0) {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e,
            }));
        }
    };

    tracing::info!("registered user {} ({})", user.username, user.id);

    HttpResponse::Created().json(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

/// POST /api/auth/login — verify credentials and mint a token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginUser>,
) -> impl Responder {
    let input = body.into_inner();

    let user = match user_db::get_user_by_username(db.get_ref(), &input.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid credentials",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if !password::verify_password(&input.password, &user.password_hash) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Invalid credentials",
        }));
    }

    let token = match jwt::create_token(user.id, &user.username, &secret.0) {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e,
            }));
        }
    };

    HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

/// GET /api/auth/me — return the currently authenticated user.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
