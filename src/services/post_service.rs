use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, PostAuthor, PostWithAuthor,
};
use crate::store::{Store, Tables};
use crate::utils::ServiceError;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub message: String,
    pub likes: usize,
    pub is_liked: bool,
}

fn author_for(tables: &Tables, user_id: &str) -> PostAuthor {
    match tables.user_by_id(user_id) {
        Some(user) => PostAuthor {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        },
        None => PostAuthor {
            id: user_id.to_string(),
            name: "Unknown User".to_string(),
            email: String::new(),
        },
    }
}

/// All posts, newest first, each with its author embedded.
pub fn list_posts(tables: &Tables) -> Vec<PostWithAuthor> {
    let mut posts: Vec<&Post> = tables.posts.iter().collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
        .into_iter()
        .map(|post| PostWithAuthor {
            author: author_for(tables, &post.user_id),
            post: post.clone(),
        })
        .collect()
}

pub fn get_post(tables: &Tables, post_id: &str) -> Result<PostWithAuthor, ServiceError> {
    let post = tables
        .posts
        .iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| ServiceError::NotFound("Post not found".to_string()))?;
    Ok(PostWithAuthor {
        author: author_for(tables, &post.user_id),
        post: post.clone(),
    })
}

pub fn create_post(
    store: &Store,
    user_id: &str,
    request: CreatePostRequest,
) -> Result<PostWithAuthor, ServiceError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ServiceError::Validation("Content is required".to_string()));
    }

    let post = Post {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        post_type: request.post_type.unwrap_or_else(|| "text".to_string()),
        media: request.media,
        likes: vec![],
        comments: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    store.update(|tables| {
        tables.posts.push(post.clone());
        Ok(PostWithAuthor {
            author: author_for(tables, user_id),
            post,
        })
    })
}

/// Toggles the caller's like on the post.
pub fn toggle_like(store: &Store, post_id: &str, user_id: &str) -> Result<LikeResponse, ServiceError> {
    store.update(|tables| {
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| ServiceError::NotFound("Post not found".to_string()))?;

        let liked = match post.likes.iter().position(|l| l == user_id) {
            Some(index) => {
                post.likes.remove(index);
                false
            }
            None => {
                post.likes.push(user_id.to_string());
                true
            }
        };
        post.updated_at = Utc::now();

        Ok(LikeResponse {
            message: if liked { "Post liked" } else { "Post unliked" }.to_string(),
            likes: post.likes.len(),
            is_liked: liked,
        })
    })
}

pub fn add_comment(
    store: &Store,
    post_id: &str,
    user_id: &str,
    request: CreateCommentRequest,
) -> Result<Comment, ServiceError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ServiceError::Validation(
            "Comment content is required".to_string(),
        ));
    }

    store.update(|tables| {
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| ServiceError::NotFound("Post not found".to_string()))?;

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        post.comments.push(comment.clone());
        post.updated_at = Utc::now();
        Ok(comment)
    })
}

/// Only the author may delete their post.
pub fn delete_post(store: &Store, post_id: &str, user_id: &str) -> Result<(), ServiceError> {
    store.update(|tables| {
        let index = tables
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or_else(|| ServiceError::NotFound("Post not found".to_string()))?;

        if tables.posts[index].user_id != user_id {
            return Err(ServiceError::Forbidden(
                "Not authorized to delete this post".to_string(),
            ));
        }

        tables.posts.remove(index);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, store)
    }

    fn seed_user(store: &Store, id: &str, name: &str) {
        store
            .update(|tables| {
                tables.users.push(User {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: format!("{}@example.com", id),
                    password: None,
                    phone: None,
                    area: None,
                    bio: None,
                    age: None,
                    interests: vec![],
                    hobbies: vec![],
                    location: None,
                    waves: vec![],
                    created_at: Utc::now(),
                });
                Ok(())
            })
            .unwrap();
    }

    fn text_post(content: &str) -> CreatePostRequest {
        CreatePostRequest {
            content: content.to_string(),
            post_type: None,
            media: None,
        }
    }

    #[test]
    fn create_rejects_blank_content() {
        let (_dir, store) = test_store();
        let err = create_post(&store, "u1", text_post("   ")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn listing_is_newest_first_with_authors() {
        let (_dir, store) = test_store();
        seed_user(&store, "u1", "Mei Lin");
        create_post(&store, "u1", text_post("first")).unwrap();
        create_post(&store, "ghost", text_post("second")).unwrap();

        let posts = list_posts(&store.read());
        assert_eq!(posts[0].post.content, "second");
        assert_eq!(posts[0].author.name, "Unknown User");
        assert_eq!(posts[1].author.name, "Mei Lin");
    }

    #[test]
    fn like_toggles() {
        let (_dir, store) = test_store();
        let created = create_post(&store, "u1", text_post("hello")).unwrap();

        let liked = toggle_like(&store, &created.post.id, "u2").unwrap();
        assert!(liked.is_liked);
        assert_eq!(liked.likes, 1);

        let unliked = toggle_like(&store, &created.post.id, "u2").unwrap();
        assert!(!unliked.is_liked);
        assert_eq!(unliked.likes, 0);
    }

    #[test]
    fn delete_is_author_only() {
        let (_dir, store) = test_store();
        let created = create_post(&store, "u1", text_post("mine")).unwrap();

        let err = delete_post(&store, &created.post.id, "u2").unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        delete_post(&store, &created.post.id, "u1").unwrap();
        assert!(store.read().posts.is_empty());
    }

    #[test]
    fn comments_append() {
        let (_dir, store) = test_store();
        let created = create_post(&store, "u1", text_post("hello")).unwrap();
        add_comment(
            &store,
            &created.post.id,
            "u2",
            CreateCommentRequest {
                content: "nice one".to_string(),
            },
        )
        .unwrap();

        let stored = get_post(&store.read(), &created.post.id).unwrap();
        assert_eq!(stored.post.comments.len(), 1);
        assert_eq!(stored.post.comments[0].content, "nice one");
    }
}
