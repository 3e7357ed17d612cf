use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity::script;
use crate::error::{AppError, AppResult};

/// All scripts in store order; replacing a script keeps its position.
pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<script::Model>> {
    Ok(script::Entity::find().all(db).await?)
}

/// Store `content` under `name`, replacing an existing script of that name.
///
/// Both fields are required; the name is trimmed, the content is kept as is.
pub async fn upsert(db: &DatabaseConnection, name: &str, content: &str) -> AppResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::MissingScriptField("name"));
    }
    if content.trim().is_empty() {
        return Err(AppError::MissingScriptField("content"));
    }

    let model = script::ActiveModel {
        name: Set(name.to_string()),
        content: Set(content.to_string()),
    };

    script::Entity::insert(model)
        .on_conflict(
            OnConflict::column(script::Column::Name)
                .update_column(script::Column::Content)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    tracing::info!(name = %name, bytes = content.len(), "script_saved");
    Ok(())
}

/// Remove the script called `name`, trimmed like on save. Returns whether a
/// row was deleted; deleting a missing script is not an error.
pub async fn delete(db: &DatabaseConnection, name: &str) -> AppResult<bool> {
    let name = name.trim();
    let result = script::Entity::delete_many()
        .filter(script::Column::Name.eq(name))
        .exec(db)
        .await?;

    let deleted = result.rows_affected > 0;
    tracing::info!(name = %name, deleted, "script_deleted");
    Ok(deleted)
}
