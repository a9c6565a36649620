use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::SkillSet;
use crate::models::projects::{self, CreateProject, ProjectListQuery, UpdateProject};

/// Insert a new project owned by `client_id`.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
    client_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        title: Set(input.title),
        description: Set(input.description),
        budget: Set(input.budget),
        deadline: Set(input.deadline),
        skills_required: Set(SkillSet(input.skills_required.unwrap_or_default())),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Fetch a project by ID with a row-level exclusive lock (`FOR UPDATE`).
///
/// The accept path locks the project row so concurrent accepts on sibling
/// proposals serialize on it.
pub async fn get_project_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await
}

/// List projects matching the browse filters, newest first, paginated.
pub async fn list_projects(
    db: &DatabaseConnection,
    query: &ProjectListQuery,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut find = projects::Entity::find();

    if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        find = find.filter(
            Condition::any()
                .add(projects::Column::Title.contains(q))
                .add(projects::Column::Description.contains(q)),
        );
    }
    if let Some(min_budget) = query.min_budget {
        find = find.filter(projects::Column::Budget.gte(min_budget));
    }
    if let Some(max_budget) = query.max_budget {
        find = find.filter(projects::Column::Budget.lte(max_budget));
    }
    if let Some(deadline_after) = query.deadline_after {
        find = find.filter(projects::Column::Deadline.gte(deadline_after));
    }
    if let Some(deadline_before) = query.deadline_before {
        find = find.filter(projects::Column::Deadline.lte(deadline_before));
    }

    find.order_by_desc(projects::Column::CreatedAt)
        .paginate(db, query.limit())
        .fetch_page(query.page() - 1)
        .await
}

/// Fetch all projects owned by a client, newest first.
pub async fn get_projects_by_client_id(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::ClientId.eq(client_id))
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing project.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(budget) = input.budget {
        active.budget = Set(Some(budget));
    }
    if let Some(deadline) = input.deadline {
        active.deadline = Set(Some(deadline));
    }
    if let Some(skills_required) = input.skills_required {
        active.skills_required = Set(SkillSet(skills_required));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project by ID (cascades to proposals and contracts).
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
