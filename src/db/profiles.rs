use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, Roles, SkillSet, UpdateProfile};

/// Insert the profile row for a freshly registered user.
///
/// Called immediately after the user insert — profile creation is an
/// explicit registration step, not a hook.
pub async fn insert_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: Roles,
    display_name: Option<String>,
) -> Result<profiles::Model, DbErr> {
    let new_profile = profiles::ActiveModel {
        user_id: Set(user_id),
        role: Set(role),
        display_name: Set(display_name),
        bio: Set(String::new()),
        skills: Set(SkillSet::default()),
        hourly_rate: Set(None),
        availability: Set(true),
        location: Set(None),
    };

    new_profile.insert(db).await
}

/// Fetch a profile by its owning user ID.
pub async fn get_profile_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(user_id).one(db).await
}

/// Update a profile. Absent fields keep their current value.
pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: UpdateProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(display_name) = input.display_name {
        active.display_name = Set(Some(display_name));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(bio);
    }
    if let Some(skills) = input.skills {
        active.skills = Set(SkillSet(skills));
    }
    if let Some(hourly_rate) = input.hourly_rate {
        active.hourly_rate = Set(Some(hourly_rate));
    }
    if let Some(availability) = input.availability {
        active.availability = Set(availability);
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }

    active.update(db).await
}
