pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;

pub use post::{NewPost, Post, PostChanges};
pub use post_tag::{NewPostTag, PostTag};
pub use tag::{Tag, TagChanges};
pub use user::{User, UserChanges};
