use sea_orm::entity::prelude::*;

/// Tag rows carry nothing but their caller-assigned id; the reproduction
/// only cares about how many ids can travel in one query.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tags_on_posts::Entity")]
    TagsOnPosts,
}

impl Related<super::tags_on_posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TagsOnPosts.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        super::tags_on_posts::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::tags_on_posts::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
