//! Content Endpoints
//! Mission: Public section reads plus audited admin CRUD

use crate::app::AppState;
use crate::auth::models::CurrentAdmin;
use crate::content::models::{
    ContactMessageCreate, ContactSection, EducationCreate, EducationPatch, ExperienceCreate,
    ExperiencePatch, Footer, LearningPhaseCreate, LearningPhasePatch, Profile, ProjectCreate,
    ProjectPatch, Skill,
};
use crate::content::store::{collections, singletons};
use crate::error::ApiError;
use crate::notifications::{notify, NotificationType};
use crate::response::{CreatedResponse, DataResponse, MessageResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Serialize a sparse patch, rejecting an empty one with a 400.
fn patch_fields<T: Serialize>(patch: &T) -> Result<Value, Value> {
    let value = serde_json::to_value(patch).unwrap_or(Value::Null);
    match value.as_object() {
        Some(map) if !map.is_empty() => Ok(value),
        _ => Err(value),
    }
}

// ============================================================================
// Public routes
// ============================================================================

/// GET /api/
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Portfolio API is running",
        "status": "success",
    }))
}

/// GET /api/profile
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let profile = state
        .content
        .get_singleton(singletons::PROFILE)?
        .ok_or_else(|| ApiError::NotFound("Profile".to_string()))?;
    Ok(Json(json!({ "success": true, "data": profile })))
}

/// GET /api/skills - skills grouped by category.
pub async fn get_skills(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let docs = state.content.get_all(collections::SKILLS)?;

    let mut grouped = Map::new();
    for doc in docs {
        if let (Some(category), Some(skills)) =
            (doc.get("category").and_then(Value::as_str), doc.get("skills"))
        {
            grouped.insert(category.to_string(), skills.clone());
        }
    }

    Ok(Json(json!({ "success": true, "data": grouped })))
}

/// GET /api/projects
pub async fn get_projects(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = state.content.get_all(collections::PROJECTS)?;
    Ok(Json(
        json!({ "success": true, "total": projects.len(), "data": projects }),
    ))
}

/// GET /api/education
pub async fn get_education(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Value>>>, ApiError> {
    Ok(Json(DataResponse::new(
        state.content.get_all(collections::EDUCATION)?,
    )))
}

/// GET /api/experience
pub async fn get_experience(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Value>>>, ApiError> {
    Ok(Json(DataResponse::new(
        state.content.get_all(collections::EXPERIENCE)?,
    )))
}

/// GET /api/learning-journey
pub async fn get_learning_journey(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let phases = state.content.get_all(collections::LEARNING_JOURNEY)?;
    Ok(Json(
        json!({ "success": true, "total": phases.len(), "data": phases }),
    ))
}

/// GET /api/contact-section
pub async fn get_contact_section(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let section = state
        .content
        .get_singleton(singletons::CONTACT_SECTION)?
        .ok_or_else(|| ApiError::NotFound("Contact section data".to_string()))?;
    Ok(Json(json!({ "success": true, "data": section })))
}

/// GET /api/footer
pub async fn get_footer(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let footer = state
        .content
        .get_singleton(singletons::FOOTER)?
        .ok_or_else(|| ApiError::NotFound("Footer data".to_string()))?;
    Ok(Json(json!({ "success": true, "data": footer })))
}

/// POST /api/contact - public contact-form submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactMessageCreate>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let mut doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    if let Some(map) = doc.as_object_mut() {
        map.insert("read".to_string(), Value::Bool(false));
    }

    let id = state.content.insert(collections::CONTACT_MESSAGES, doc)?;

    notify(
        &state.notifications,
        NotificationType::Message,
        format!("New message from {}: {}", payload.name, payload.message),
    );

    Ok(Json(CreatedResponse::new("Message sent successfully!", id)))
}

// ============================================================================
// Admin: profile & skills
// ============================================================================

/// PUT /api/admin/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<Profile>,
) -> Result<Json<MessageResponse>, ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    state.content.put_singleton(singletons::PROFILE, doc)?;

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Profile: Admin {} made changes in Profile Section.",
            admin.username
        ),
    );

    Ok(Json(MessageResponse::new("Profile updated successfully")))
}

/// PUT /api/admin/skills/:category
pub async fn update_skills(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(category): Path<String>,
    Json(skills): Json<Vec<Skill>>,
) -> Result<Json<MessageResponse>, ApiError> {
    if let Some(bad) = skills.iter().find(|s| s.proficiency > 100) {
        return Err(ApiError::InvalidOperation(format!(
            "Proficiency for '{}' must be between 0 and 100",
            bad.name
        )));
    }

    let doc = json!({ "category": category, "skills": skills });
    state.content.upsert(collections::SKILLS, &category, doc)?;

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Skills: Admin {} made changes in Skills Category {}.",
            admin.username, category
        ),
    );

    Ok(Json(MessageResponse::new(format!(
        "Skills for {} updated successfully",
        category
    ))))
}

/// DELETE /api/admin/skills/:category
pub async fn delete_skills_category(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(category): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.content.delete(collections::SKILLS, &category)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Skills: Admin {} failed to delete category {}.",
                admin.username, category
            ),
        );
        return Err(ApiError::NotFound("Category".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS Skills: Admin {} deleted category {}.",
            admin.username, category
        ),
    );

    Ok(Json(MessageResponse::new(format!(
        "Category '{}' deleted successfully",
        category
    ))))
}

// ============================================================================
// Admin: projects
// ============================================================================

/// POST /api/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<ProjectCreate>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    let id = state.content.insert(collections::PROJECTS, doc)?;

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS Project: Admin {} created new project named {}.",
            admin.username, payload.title
        ),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Project created successfully", id)),
    ))
}

/// PUT /api/admin/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = patch_fields(&patch).map_err(|_| {
        notify(
            &state.notifications,
            NotificationType::Warning,
            format!(
                "WARNING Project: Admin {}, nothing to update in project with ID {}.",
                admin.username, id
            ),
        );
        ApiError::InvalidOperation("No data to update".to_string())
    })?;

    if !state.content.update(collections::PROJECTS, &id, &fields)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Project: Admin {} failed to update unknown project.",
                admin.username
            ),
        );
        return Err(ApiError::NotFound("Project".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Project: Admin {} updated project with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Project updated successfully")))
}

/// DELETE /api/admin/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.content.delete(collections::PROJECTS, &id)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Project: Admin {} failed to delete project with ID {}. || Project Not Found",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Project".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS Project: Admin {} deleted project with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

// ============================================================================
// Admin: education
// ============================================================================

/// POST /api/admin/education
pub async fn create_education(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<EducationCreate>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    let id = state.content.insert(collections::EDUCATION, doc)?;

    notify(
        &state.notifications,
        NotificationType::Create,
        format!(
            "SUCCESS CREATE Education: Admin {} created a new education entry.",
            admin.username
        ),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Education entry created", id)),
    ))
}

/// PUT /api/admin/education/:id
pub async fn update_education(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    Json(patch): Json<EducationPatch>,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = patch_fields(&patch).map_err(|_| {
        notify(
            &state.notifications,
            NotificationType::Warning,
            format!(
                "WARNING Education: Admin {} tried making empty changes in Education Section.",
                admin.username
            ),
        );
        ApiError::InvalidOperation("No update data provided".to_string())
    })?;

    if !state.content.update(collections::EDUCATION, &id, &fields)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Education: Admin {} failed to update education.",
                admin.username
            ),
        );
        return Err(ApiError::NotFound("Education entry".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Education: Admin {} made changes in Education Section.",
            admin.username
        ),
    );

    Ok(Json(MessageResponse::new("Education entry updated")))
}

/// DELETE /api/admin/education/:id
pub async fn delete_education(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.content.delete(collections::EDUCATION, &id)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR DELETE Education: Admin {} failed to delete education entry with ID {}. || Education Entry Not Found",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Education entry".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS DELETE Education: Admin {} deleted education entry with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Education entry deleted")))
}

// ============================================================================
// Admin: experience
// ============================================================================

/// POST /api/admin/experience
pub async fn create_experience(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<ExperienceCreate>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    let id = state.content.insert(collections::EXPERIENCE, doc)?;

    notify(
        &state.notifications,
        NotificationType::Create,
        format!(
            "SUCCESS CREATE Experience: Admin {} created a new experience entry.",
            admin.username
        ),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Experience entry created successfully",
            id,
        )),
    ))
}

/// PUT /api/admin/experience/:id
pub async fn update_experience(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    Json(patch): Json<ExperiencePatch>,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = patch_fields(&patch).map_err(|_| {
        notify(
            &state.notifications,
            NotificationType::Warning,
            format!(
                "WARNING Experience: Admin {} tried making empty changes in Experience Section.",
                admin.username
            ),
        );
        ApiError::InvalidOperation("No update data provided".to_string())
    })?;

    if !state.content.update(collections::EXPERIENCE, &id, &fields)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Experience: Admin {} failed to update experience.",
                admin.username
            ),
        );
        return Err(ApiError::NotFound("Experience entry".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Experience: Admin {} made changes in Experience Section.",
            admin.username
        ),
    );

    Ok(Json(MessageResponse::new(
        "Experience entry updated successfully",
    )))
}

/// DELETE /api/admin/experience/:id
pub async fn delete_experience(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.content.delete(collections::EXPERIENCE, &id)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR DELETE Experience: Admin {} failed to delete experience entry with ID {}. || Experience Entry Not Found",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Experience entry".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS DELETE Experience: Admin {} deleted experience entry with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new(
        "Experience entry deleted successfully",
    )))
}

// ============================================================================
// Admin: learning journey
// ============================================================================

/// POST /api/admin/learning-journey
pub async fn create_learning_phase(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<LearningPhaseCreate>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    let id = state.content.insert(collections::LEARNING_JOURNEY, doc)?;

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS Learning Journey: Admin {} created new learning phase {}.",
            admin.username, payload.phase
        ),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Phase created successfully", id)),
    ))
}

/// PUT /api/admin/learning-journey/:id
pub async fn update_learning_phase(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    Json(patch): Json<LearningPhasePatch>,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = patch_fields(&patch)
        .map_err(|_| ApiError::InvalidOperation("No data to update".to_string()))?;

    if !state
        .content
        .update(collections::LEARNING_JOURNEY, &id, &fields)?
    {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Learning Journey: Admin {} failed to update learning phase with ID {}.",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Phase".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Learning Journey: Admin {} made changes in phase with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Phase updated successfully")))
}

/// DELETE /api/admin/learning-journey/:id
pub async fn delete_learning_phase(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.content.delete(collections::LEARNING_JOURNEY, &id)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Learning Journey: Admin {} failed to delete learning phase with ID {}. || Phase Not Found",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Phase".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS DELETE Learning Journey: Admin {} deleted phase with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Phase deleted successfully")))
}

// ============================================================================
// Admin: contact section, footer, messages
// ============================================================================

/// PUT /api/admin/contact-section
pub async fn update_contact_section(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<ContactSection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    state
        .content
        .put_singleton(singletons::CONTACT_SECTION, doc)?;

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Contact: Admin {} made changes in Contact Section.",
            admin.username
        ),
    );

    Ok(Json(MessageResponse::new("Contact section updated")))
}

/// PUT /api/admin/footer
pub async fn update_footer(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<Footer>,
) -> Result<Json<MessageResponse>, ApiError> {
    let doc = serde_json::to_value(&payload).map_err(|_| ApiError::Internal)?;
    state.content.put_singleton(singletons::FOOTER, doc)?;

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Footer: Admin {} made changes in Footer Section.",
            admin.username
        ),
    );

    Ok(Json(MessageResponse::new("Footer updated successfully")))
}

/// GET /api/admin/messages
pub async fn get_contact_messages(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let messages = state.content.get_all(collections::CONTACT_MESSAGES)?;
    Ok(Json(
        json!({ "success": true, "total": messages.len(), "data": messages }),
    ))
}

/// PUT /api/admin/messages/:id/read
pub async fn mark_message_read(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state
        .content
        .update(collections::CONTACT_MESSAGES, &id, &json!({"read": true}))?
    {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Messages: Admin {} failed to mark message with ID {} as read.",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Message".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Update,
        format!(
            "SUCCESS UPDATE Messages: Admin {} marked message with ID {} as read.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Message marked as read")))
}

/// DELETE /api/admin/messages/:id
pub async fn delete_contact_message(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.content.delete(collections::CONTACT_MESSAGES, &id)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Messages: Admin {} failed to delete message with ID {}. || Message Not Found",
                admin.username, id
            ),
        );
        return Err(ApiError::NotFound("Message".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS DELETE Messages: Admin {} deleted message with ID {}.",
            admin.username, id
        ),
    );

    Ok(Json(MessageResponse::new("Message deleted successfully")))
}

// ============================================================================
// Admin: dashboard
// ============================================================================

/// GET /api/admin/dashboard-summary
pub async fn dashboard_summary(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let project_count = state.content.count(collections::PROJECTS)?;
    let skill_category_count = state.content.count(collections::SKILLS)?;

    let messages = state.content.get_all(collections::CONTACT_MESSAGES)?;
    let unread_messages: Vec<&Value> = messages
        .iter()
        .filter(|m| !m.get("read").and_then(Value::as_bool).unwrap_or(false))
        .collect();
    let recent_messages: Vec<&Value> = unread_messages.iter().take(5).copied().collect();

    let unread_notification_count = state.notifications.count_unread()?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "projectCount": project_count,
            "messageCount": messages.len(),
            "unreadMessageCount": unread_messages.len(),
            "skillCategoryCount": skill_category_count,
            "recentMessages": recent_messages,
            "unreadNotificationCount": unread_notification_count,
        },
    })))
}
