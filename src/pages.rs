use crate::user::User;

pub fn home() -> String {
    String::from(
        r#"<h1>Welcome</h1>
    <a href="/users">Users</a> | <a href="/users/new">Register User</a> | <a href="/login">Login</a>"#,
    )
}

pub fn home_fallback() -> String {
    String::from("<h1>Welcome! (Database unavailable, showing fallback UI.)</h1>")
}

/// One list item per user, with a delete form whose submission is rewritten
/// into a fetch DELETE by the trailing script.
pub fn user_list(users: &[User]) -> String {
    let items = users
        .iter()
        .map(|user| {
            format!(
                r#"<li>{username}
      <a href="/users/{id}">View</a>
      <a href="/users/{id}/edit">Edit</a>
      <form action="/users/{id}?_method=DELETE" method="post" style="display:inline;">
        <button type="submit">Delete</button>
      </form>
    </li>"#,
                username = user.username,
                id = user.id,
            )
        })
        .collect::<Vec<String>>()
        .join("");

    format!(
        r#"<h2>Users</h2>
    <ul>{items}</ul>
    <a href="/">Home</a> | <a href="/users/new">Register User</a>
    <script>
      document.querySelectorAll('form[action*="_method=DELETE"]').forEach(f => {{
        f.onsubmit = e => {{
          e.preventDefault();
          fetch(f.action.replace('?_method=DELETE',''), {{method:'DELETE'}})
            .then(()=>location.reload());
        }}
      }});
    </script>"#,
        items = items,
    )
}

pub fn register_form() -> String {
    String::from(
        r#"<h2>Register User</h2>
    <form method="post" action="/users">
      <input name="username" placeholder="Username" required>
      <input name="password" type="password" placeholder="Password" required>
      <button>Register</button>
    </form>
    <a href="/">Home</a>"#,
    )
}

pub fn user_detail(user: &User) -> String {
    format!(
        r#"<h2>User: {username}</h2>
    <p>ID: {id}</p>
    <a href="/users/{id}/edit">Edit</a>
    <a href="/users">Back to Users</a>"#,
        username = user.username,
        id = user.id,
    )
}

/// Pre-filled edit form; the script turns the submission into a fetch PUT
/// with a form-urlencoded body.
pub fn edit_form(user: &User) -> String {
    format!(
        r#"<h2>Edit User</h2>
    <form method="post" action="/users/{id}?_method=PUT">
      <input name="username" value="{username}" required>
      <input name="password" type="password" placeholder="New Password (optional)">
      <button>Update</button>
    </form>
    <a href="/users">Back to Users</a>
    <script>
      document.querySelector('form').onsubmit = function(e) {{
        e.preventDefault();
        fetch('/users/{id}', {{
          method: 'PUT',
          headers: {{'Content-Type':'application/x-www-form-urlencoded'}},
          body: new URLSearchParams(new FormData(this))
        }}).then(()=>location.href='/users');
      }}
    </script>"#,
        username = user.username,
        id = user.id,
    )
}

pub fn login_form() -> String {
    String::from(
        r#"<h2>Login</h2>
    <form method="post" action="/login">
      <input name="username" placeholder="Username" required>
      <input name="password" type="password" placeholder="Password" required>
      <button>Login</button>
    </form>
    <a href="/">Home</a>"#,
    )
}

pub fn login_success() -> String {
    String::from(r#"<h2>Login successful</h2><a href="/">Home</a>"#)
}

pub fn login_failed() -> String {
    String::from(r#"<h2>Invalid credentials</h2><a href="/login">Try again</a>"#)
}

pub fn logged_out() -> String {
    String::from(r#"<h2>Logged out</h2><a href="/">Home</a>"#)
}
