//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use board_core::domain::{Comment, CommentId, Member, MemberId, Post, PostId};
use board_core::error::RepoError;
use board_core::ports::{
    BaseRepository, CommentRepository, MemberRepository, Page, PageRequest, PostRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::member::{self, Entity as MemberEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL member repository.
pub type PostgresMemberRepository<'c, C> = PostgresBaseRepository<'c, C, MemberEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository<'c, C> = PostgresBaseRepository<'c, C, PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository<'c, C> = PostgresBaseRepository<'c, C, CommentEntity>;

fn missing_author(table: &str, id: i64) -> RepoError {
    RepoError::Query(format!("{table} row {id} references a missing member"))
}

fn unsaved(what: &str) -> RepoError {
    RepoError::Constraint(format!("{what} must be saved first"))
}

#[async_trait]
impl<'c, C: ConnectionTrait> BaseRepository<Member, MemberId> for PostgresMemberRepository<'c, C> {
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, RepoError> {
        Ok(self.find_model(id.get()).await?.map(Into::into))
    }

    async fn save(&self, entity: Member) -> Result<Member, RepoError> {
        let model = match entity.id() {
            None => {
                member::ActiveModel {
                    id: NotSet,
                    nickname: Set(entity.nickname().to_string()),
                    created_at: Set(entity.created_at().into()),
                    updated_at: Set(entity.updated_at().into()),
                }
                .insert(self.db)
                .await
            }
            Some(id) => {
                member::ActiveModel {
                    id: Unchanged(id.get()),
                    nickname: Set(entity.nickname().to_string()),
                    created_at: Unchanged(entity.created_at().into()),
                    updated_at: Set(entity.updated_at().into()),
                }
                .update(self.db)
                .await
            }
        }
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl<'c, C: ConnectionTrait> MemberRepository for PostgresMemberRepository<'c, C> {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Member>, RepoError> {
        tracing::debug!(nickname, "Finding member by nickname");

        let result = MemberEntity::find()
            .filter(member::Column::Nickname.eq(nickname))
            .one(self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Comments (with authors) of every post in `post_ids`, grouped by post and
/// ordered by id. One query regardless of how many posts are asked for.
async fn load_comments<C: ConnectionTrait>(
    db: &C,
    post_ids: Vec<i64>,
) -> Result<HashMap<i64, Vec<Comment>>, RepoError> {
    let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(by_post);
    }

    let rows = CommentEntity::find()
        .filter(comment::Column::PostId.is_in(post_ids))
        .find_also_related(MemberEntity)
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await
        .map_err(map_db_err)?;

    for (model, author) in rows {
        let author = author.ok_or_else(|| missing_author("comment", model.id))?;
        by_post
            .entry(model.post_id)
            .or_default()
            .push(model.into_domain(author.into()));
    }

    Ok(by_post)
}

fn assemble(
    model: post::Model,
    author: Option<member::Model>,
    comments: Vec<Comment>,
) -> Result<Post, RepoError> {
    let author = author.ok_or_else(|| missing_author("post", model.id))?;
    Ok(Post::restore(
        PostId(model.id),
        model.title,
        model.content,
        author.into(),
        model.created_at.into(),
        model.updated_at.into(),
        comments,
    ))
}

#[async_trait]
impl<'c, C: ConnectionTrait> BaseRepository<Post, PostId> for PostgresPostRepository<'c, C> {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let Some(model) = self.find_model(id.get()).await? else {
            return Ok(None);
        };

        let author = MemberEntity::find_by_id(model.author_id)
            .one(self.db)
            .await
            .map_err(map_db_err)?;
        let comments = load_comments(self.db, vec![model.id])
            .await?
            .remove(&model.id)
            .unwrap_or_default();

        assemble(model, author, comments).map(Some)
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let author_id = entity.author().id().ok_or_else(|| unsaved("post author"))?;

        let model = match entity.id() {
            None => {
                post::ActiveModel {
                    id: NotSet,
                    title: Set(entity.title().to_string()),
                    content: Set(entity.content().to_string()),
                    author_id: Set(author_id.get()),
                    created_at: Set(entity.created_at().into()),
                    updated_at: Set(entity.updated_at().into()),
                }
                .insert(self.db)
                .await
            }
            Some(id) => {
                post::ActiveModel {
                    id: Unchanged(id.get()),
                    title: Set(entity.title().to_string()),
                    content: Set(entity.content().to_string()),
                    author_id: Unchanged(author_id.get()),
                    created_at: Unchanged(entity.created_at().into()),
                    updated_at: Set(entity.updated_at().into()),
                }
                .update(self.db)
                .await
            }
        }
        .map_err(map_db_err)?;

        Ok(Post::restore(
            PostId(model.id),
            model.title,
            model.content,
            entity.author().clone(),
            model.created_at.into(),
            model.updated_at.into(),
            entity.comments().to_vec(),
        ))
    }
}

#[async_trait]
impl<'c, C: ConnectionTrait> PostRepository for PostgresPostRepository<'c, C> {
    async fn find_all_ordered_by_id_desc(
        &self,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let total_elements = PostEntity::find()
            .count(self.db)
            .await
            .map_err(map_db_err)?;
        if request.offset() >= total_elements {
            return Ok(Page::new(Vec::new(), request, total_elements));
        }

        let rows = PostEntity::find()
            .find_also_related(MemberEntity)
            .order_by_desc(post::Column::Id)
            .offset(request.offset())
            .limit(request.size())
            .all(self.db)
            .await
            .map_err(map_db_err)?;

        let post_ids = rows.iter().map(|(model, _)| model.id).collect();
        let mut comments = load_comments(self.db, post_ids).await?;

        let items = rows
            .into_iter()
            .map(|(model, author)| {
                let post_comments = comments.remove(&model.id).unwrap_or_default();
                assemble(model, author, post_comments)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, request, total_elements))
    }

    async fn find_detail_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let found = PostEntity::find_by_id(id.get())
            .find_also_related(MemberEntity)
            .one(self.db)
            .await
            .map_err(map_db_err)?;
        let Some((model, author)) = found else {
            return Ok(None);
        };

        let comments = load_comments(self.db, vec![model.id])
            .await?
            .remove(&model.id)
            .unwrap_or_default();

        assemble(model, author, comments).map(Some)
    }

    async fn delete(&self, post: Post) -> Result<(), RepoError> {
        let id = post.id().ok_or_else(|| unsaved("post"))?;
        self.delete_model(id.get()).await
    }
}

#[async_trait]
impl<'c, C: ConnectionTrait> BaseRepository<Comment, CommentId>
    for PostgresCommentRepository<'c, C>
{
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepoError> {
        let found = CommentEntity::find_by_id(id.get())
            .find_also_related(MemberEntity)
            .one(self.db)
            .await
            .map_err(map_db_err)?;

        match found {
            Some((model, Some(author))) => Ok(Some(model.into_domain(author.into()))),
            Some((model, None)) => Err(missing_author("comment", model.id)),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: Comment) -> Result<Comment, RepoError> {
        let author_id = entity.author().id().ok_or_else(|| unsaved("comment author"))?;
        let post_id = entity
            .post_id()
            .ok_or_else(|| RepoError::Constraint("comment is not bound to a post".to_string()))?;

        let model = match entity.id() {
            None => {
                comment::ActiveModel {
                    id: NotSet,
                    content: Set(entity.content().to_string()),
                    author_id: Set(author_id.get()),
                    post_id: Set(post_id.get()),
                    created_at: Set(entity.created_at().into()),
                }
                .insert(self.db)
                .await
            }
            Some(id) => {
                comment::ActiveModel {
                    id: Unchanged(id.get()),
                    content: Set(entity.content().to_string()),
                    author_id: Unchanged(author_id.get()),
                    post_id: Set(post_id.get()),
                    created_at: Unchanged(entity.created_at().into()),
                }
                .update(self.db)
                .await
            }
        }
        .map_err(map_db_err)?;

        Ok(model.into_domain(entity.author().clone()))
    }
}

#[async_trait]
impl<'c, C: ConnectionTrait> CommentRepository for PostgresCommentRepository<'c, C> {
    async fn delete(&self, comment: Comment) -> Result<(), RepoError> {
        let id = comment.id().ok_or_else(|| unsaved("comment"))?;
        self.delete_model(id.get()).await
    }

    async fn delete_all_by_post(&self, post_id: PostId) -> Result<u64, RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(post_id.get()))
            .exec(self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
