use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
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

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::tags_on_posts::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::tags_on_posts::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
