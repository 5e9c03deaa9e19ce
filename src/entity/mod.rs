pub mod post;
pub mod tag;
pub mod tags_on_posts;

pub use post::Entity as Post;
pub use tag::Entity as Tag;
pub use tags_on_posts::Entity as TagsOnPosts;
