use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::{profiles as profile_db, projects as project_db};
use crate::models::profiles::Roles;
use crate::models::projects::{CreateProject, ProjectListQuery, UpdateProject};

/// GET /api/projects — browse projects with search and filters.
/// Query params: ?q=&min_budget=&max_budget=&deadline_after=&deadline_before=&page=&limit=
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> impl Responder {
    match project_db::list_projects(db.get_ref(), &query).await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch projects: {e}"),
        })),
    }
}

/// GET /api/projects/mine — the authenticated client's own projects
/// (the dashboard listing).
pub async fn get_my_projects(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match project_db::get_projects_by_client_id(db.get_ref(), user.0.id).await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch projects: {e}"),
        })),
    }
}

/// POST /api/projects — post a new project (clients only).
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> impl Responder {
    let client_id = user.0.id;

    match profile_db::get_profile_by_user_id(db.get_ref(), client_id).await {
        Ok(Some(profile)) if profile.role == Roles::Client => {}
        Ok(Some(_)) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only clients can post projects",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Profile not found",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match project_db::insert_project(db.get_ref(), body.into_inner(), client_id).await {
        Ok(project) => HttpResponse::Created().json(project),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create project: {e}"),
        })),
    }
}

/// GET /api/projects/{id} — get a single project.
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::project(&id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => match project_db::get_project_by_id(db.get_ref(), id).await {
            Ok(Some(project)) => {
                // Store in cache (10 minute TTL)
                let _ = cache.set(&cache_key, &project, Some(600)).await;
                HttpResponse::Ok().json(project)
            }
            Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        Err(e) => {
            tracing::warn!("Cache error: {}", e);
            match project_db::get_project_by_id(db.get_ref(), id).await {
                Ok(Some(project)) => HttpResponse::Ok().json(project),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Project {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// PUT /api/projects/{id} — update a project (owner only).
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> impl Responder {
    let id = path.into_inner();

    match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(project)) if project.client_id == user.0.id => {}
        Ok(Some(_)) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "You can only update your own projects",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match project_db::update_project(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::project(&id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update project: {e}"),
        })),
    }
}

/// DELETE /api/projects/{id} — delete a project (owner only; cascades to
/// proposals and contracts).
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(project)) if project.client_id == user.0.id => {}
        Ok(Some(_)) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "You can only delete your own projects",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match project_db::delete_project(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::project(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Project {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Project {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete project: {e}"),
        })),
    }
}
