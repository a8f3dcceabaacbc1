//! Posts API demo
//!
//! Lists the posts of jsonplaceholder.typicode.com into typed values, then
//! shows the fluent form on a single post.

#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use jsonreq::prelude::*;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

fn run() -> Result<()> {
    let mut posts: Vec<Post> = Vec::new();
    get(format!("{BASE_URL}/posts"), Some(&mut posts), None)?;
    println!("{} posts", posts.len());

    let mut first = Post::default();
    url!("{BASE_URL}/posts/{}", 1)
        .add_header("Accept", "application/json")
        .get(Some(&mut first), None)?;
    println!("#{} by user {}: {}", first.id, first.user_id, first.title);
    println!("{}", first.body);

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("request failed ({}): {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}
