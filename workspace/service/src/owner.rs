//! Owner accounts: CRUD and login.

use common::{LoginResponse, OwnerRequest, OwnerResponse};
use model::entities::owner;
use model::validation::require_text;
use sea_orm::{ColumnTrait, Condition};
use tracing::{debug, info, instrument, trace, warn};

use crate::auth::{TokenIssuer, hash_password_blocking, verify_password_blocking};
use crate::converters::owner_response;
use crate::error::{Result, ServiceError, is_unique_violation};
use crate::store::Store;

const ENTITY: &str = "Owner";

pub async fn list_all(store: &Store) -> Result<Vec<OwnerResponse>> {
    let owners = store.collection::<owner::Entity>().get_all().await?;
    debug!("Loaded {} owners", owners.len());
    Ok(owners.into_iter().map(owner_response).collect())
}

pub async fn get_by_id(store: &Store, id: i32) -> Result<Option<OwnerResponse>> {
    let owner = store.collection::<owner::Entity>().get_by_id(id).await?;
    Ok(owner.map(owner_response))
}

async fn find_by_username(store: &Store, username: &str) -> Result<Option<owner::Model>> {
    let mut matches = store
        .collection::<owner::Entity>()
        .find(Condition::all().add(owner::Column::Username.eq(username)))
        .await?;
    Ok(matches.pop())
}

/// Fails with `UsernameTaken` when another owner already uses `username`.
async fn ensure_username_free(store: &Store, username: &str, owner_id: Option<i32>) -> Result<()> {
    match find_by_username(store, username).await? {
        Some(holder) if Some(holder.id) != owner_id => {
            warn!("Username '{}' is held by owner {}", username, holder.id);
            Err(ServiceError::UsernameTaken(username.to_string()))
        }
        _ => Ok(()),
    }
}

async fn build(request: &OwnerRequest) -> Result<owner::Model> {
    require_text("Password", &request.password)?;
    let hash = hash_password_blocking(request.password.clone()).await?;
    Ok(owner::Model::new(
        &request.name,
        &request.address,
        &request.photo,
        request.birthday,
        &request.username,
        hash,
    )?)
}

fn map_insert_error(err: sea_orm::DbErr, username: &str) -> ServiceError {
    if is_unique_violation(&err) {
        ServiceError::UsernameTaken(username.to_string())
    } else {
        err.into()
    }
}

#[instrument(skip(store, request), fields(username = %request.username))]
pub async fn create(store: &Store, request: OwnerRequest) -> Result<OwnerResponse> {
    trace!("Registering owner");
    ensure_username_free(store, &request.username, None).await?;

    let model = build(&request).await?;
    let stored = store
        .collection::<owner::Entity>()
        .add(model)
        .await
        .map_err(|err| map_insert_error(err, &request.username))?;

    info!("Owner registered with ID {}", stored.id);
    Ok(owner_response(stored))
}

/// Replaces every field of the owner, re-hashing the given password.
#[instrument(skip(store, request), fields(username = %request.username))]
pub async fn update(store: &Store, id: i32, request: OwnerRequest) -> Result<OwnerResponse> {
    trace!("Updating owner {}", id);
    if store.collection::<owner::Entity>().get_by_id(id).await?.is_none() {
        warn!("Owner {} not found for update", id);
        return Err(ServiceError::not_found(ENTITY, id));
    }
    ensure_username_free(store, &request.username, Some(id)).await?;

    let mut model = build(&request).await?;
    model.id = id;
    match store.collection::<owner::Entity>().update(model).await {
        Ok(Some(updated)) => {
            info!("Owner {} updated", id);
            Ok(owner_response(updated))
        }
        Ok(None) => {
            warn!("Owner {} not found for update", id);
            Err(ServiceError::not_found(ENTITY, id))
        }
        Err(err) => Err(map_insert_error(err, &request.username)),
    }
}

/// Deletes the owner. Properties that reference it keep their `owner_id`.
pub async fn delete(store: &Store, id: i32) -> Result<()> {
    if store.collection::<owner::Entity>().remove_by_id(id).await? {
        info!("Owner {} deleted", id);
        Ok(())
    } else {
        warn!("Owner {} not found for delete", id);
        Err(ServiceError::not_found(ENTITY, id))
    }
}

/// Verifies the credentials and issues a token.
///
/// Unknown usernames and wrong passwords both give `None`.
#[instrument(skip(store, tokens, password))]
pub async fn authenticate(
    store: &Store,
    tokens: &TokenIssuer,
    username: &str,
    password: &str,
) -> Result<Option<LoginResponse>> {
    let owner = find_by_username(store, username).await?;
    let stored_hash = owner.as_ref().map(|owner| owner.password_hash.clone());
    let verified = verify_password_blocking(password.to_string(), stored_hash).await?;
    let Some(owner) = owner.filter(|_| verified) else {
        debug!("Unknown username or password mismatch");
        return Ok(None);
    };

    let token = tokens.issue(owner.id, &owner.username)?;
    info!("Owner {} logged in", owner.id);
    Ok(Some(LoginResponse {
        token,
        owner: owner_response(owner),
    }))
}
