#[macro_use]
extern crate rocket;


mod auth;
mod database;
mod method_override;
mod pages;
mod user;

use database::{Database, StoreError};
use method_override::MethodOverride;
use rocket::form::Form;
use rocket::response::Redirect;
use rocket::{Build, Rocket, State};
use user::{FormAddUser, FormUpdateUser};

#[derive(Debug, Responder)]
enum PageResponse {
    #[response(status = 200, content_type = "html")]
    Page(String),
    Redirect(Redirect),
    #[response(status = 200)]
    Empty(()),
    #[response(status = 400, content_type = "json")]
    Conflict(String),
    #[response(status = 404, content_type = "plain")]
    NotFound(String),
    #[response(status = 500, content_type = "plain")]
    Internal(String),
}

fn conflict() -> PageResponse {
    PageResponse::Conflict(String::from("{ \"error\": \"User already exists\" }"))
}

fn internal(err: StoreError) -> PageResponse {
    PageResponse::Internal(format!("Internal error: {}", err))
}

#[get("/")]
async fn get_index(db: &State<Database>) -> PageResponse {
    // Schema creation is idempotent; a broken store degrades to fallback UI.
    match db.create_tables().await {
        Ok(()) => PageResponse::Page(pages::home()),
        Err(_) => PageResponse::Page(pages::home_fallback()),
    }
}

#[get("/users")]
async fn get_users(db: &State<Database>) -> PageResponse {
    match db.list_users().await {
        Ok(users) => PageResponse::Page(pages::user_list(&users)),
        Err(err) => internal(err),
    }
}

#[get("/users/new")]
fn get_new_user() -> PageResponse {
    PageResponse::Page(pages::register_form())
}

#[post("/users", data = "<form>")]
async fn post_users(db: &State<Database>, form: Form<FormAddUser>) -> PageResponse {
    let form = form.into_inner();

    let hash = match auth::hash_password(form.password.as_str()) {
        Ok(hash) => hash,
        Err(err) => return PageResponse::Internal(format!("Internal error: {}", err)),
    };

    match db.add_user(form.username.as_str(), hash.as_str()).await {
        Ok(_user) => PageResponse::Redirect(Redirect::to(uri!(get_users))),
        Err(StoreError::Conflict) => conflict(),
        Err(err) => internal(err),
    }
}

#[get("/users/<id>")]
async fn get_user(db: &State<Database>, id: i64) -> PageResponse {
    match db.user_select_id(id).await {
        Ok(user) => PageResponse::Page(pages::user_detail(&user)),
        Err(StoreError::NotFound) => PageResponse::NotFound(String::from("User not found")),
        Err(err) => internal(err),
    }
}

#[get("/users/<id>/edit")]
async fn get_edit_user(db: &State<Database>, id: i64) -> PageResponse {
    match db.user_select_id(id).await {
        Ok(user) => PageResponse::Page(pages::edit_form(&user)),
        Err(StoreError::NotFound) => PageResponse::NotFound(String::from("User not found")),
        Err(err) => internal(err),
    }
}

#[put("/users/<id>", data = "<form>")]
async fn put_user(db: &State<Database>, id: i64, form: Form<FormUpdateUser>) -> PageResponse {
    let form = form.into_inner();

    // An empty submitted password means "keep the stored one".
    let hash = match form.password.as_deref().filter(|plain| !plain.is_empty()) {
        Some(plain) => match auth::hash_password(plain) {
            Ok(hash) => Some(hash),
            Err(err) => return PageResponse::Internal(format!("Internal error: {}", err)),
        },
        None => None,
    };

    match db
        .update_user(id, form.username.as_str(), hash.as_deref())
        .await
    {
        Ok(_updated) => PageResponse::Empty(()),
        Err(StoreError::Conflict) => conflict(),
        Err(err) => internal(err),
    }
}

#[delete("/users/<id>")]
async fn delete_user(db: &State<Database>, id: i64) -> PageResponse {
    match db.delete_user(id).await {
        Ok(_deleted) => PageResponse::Empty(()),
        Err(err) => internal(err),
    }
}

#[get("/login")]
fn get_login() -> PageResponse {
    PageResponse::Page(pages::login_form())
}

#[post("/login", data = "<form>")]
async fn post_login(db: &State<Database>, form: Form<FormAddUser>) -> PageResponse {
    let form = form.into_inner();

    match auth::validate_login(db, form.username.as_str(), form.password.as_str()).await {
        Ok(true) => PageResponse::Page(pages::login_success()),
        Ok(false) => PageResponse::Page(pages::login_failed()),
        Err(err) => internal(err),
    }
}

#[post("/logout")]
fn post_logout() -> PageResponse {
    PageResponse::Page(pages::logged_out())
}

pub fn build(db: Database) -> Rocket<Build> {
    rocket::build()
        .attach(MethodOverride)
        .manage(db)
        .mount(
            "/",
            routes![
                get_index,
                get_users,
                get_new_user,
                post_users,
                get_user,
                get_edit_user,
                put_user,
                delete_user,
                get_login,
                post_login,
                post_logout
            ],
        )
}

#[launch]
async fn rocket() -> _ {
    let url = database::database_url();
    let db = Database::open(url.as_str())
        .unwrap_or_else(|err| panic!("Error connecting to {}: {}", url, err));

    // The home page retries this and falls back when the store is broken.
    let _ = db.create_tables().await;

    build(db)
}
