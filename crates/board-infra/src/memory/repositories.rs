//! Repository views over an in-memory unit of work.

use async_trait::async_trait;

use board_core::domain::{Comment, CommentId, Member, MemberId, Post, PostId};
use board_core::error::RepoError;
use board_core::ports::{
    BaseRepository, CommentRepository, MemberRepository, Page, PageRequest, PostRepository,
};

use super::store::{CommentRow, InMemoryUnitOfWork, MemberRow, PostRow, Tables};

fn unsaved(what: &str) -> RepoError {
    RepoError::Constraint(format!("{what} must be saved first"))
}

fn require_member(tables: &Tables, id: MemberId) -> Result<(), RepoError> {
    if tables.members.contains_key(&id.get()) {
        Ok(())
    } else {
        Err(RepoError::Constraint(format!("member {id} does not exist")))
    }
}

pub struct InMemoryMemberRepository<'a> {
    uow: &'a InMemoryUnitOfWork,
}

impl<'a> InMemoryMemberRepository<'a> {
    pub fn new(uow: &'a InMemoryUnitOfWork) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl BaseRepository<Member, MemberId> for InMemoryMemberRepository<'_> {
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, RepoError> {
        self.uow.read(|tables| {
            tables
                .members
                .contains_key(&id.get())
                .then(|| tables.member(id.get()))
                .transpose()
        })?
    }

    async fn save(&self, entity: Member) -> Result<Member, RepoError> {
        self.uow.write(|tables| {
            if tables.nickname_taken(entity.nickname(), entity.id().map(MemberId::get)) {
                return Err(RepoError::Constraint(format!(
                    "nickname '{}' is already taken",
                    entity.nickname()
                )));
            }

            let id = match entity.id() {
                Some(id) if tables.members.contains_key(&id.get()) => id.get(),
                Some(_) => return Err(RepoError::NotFound),
                None => tables.next_member_id(),
            };
            tables.members.insert(
                id,
                MemberRow {
                    nickname: entity.nickname().to_string(),
                    created_at: entity.created_at(),
                    updated_at: entity.updated_at(),
                },
            );

            tables.member(id)
        })
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository<'_> {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Member>, RepoError> {
        self.uow.read(|tables| {
            tables
                .members
                .iter()
                .find(|(_, row)| row.nickname == nickname)
                .map(|(id, _)| tables.member(*id))
                .transpose()
        })?
    }
}

pub struct InMemoryPostRepository<'a> {
    uow: &'a InMemoryUnitOfWork,
}

impl<'a> InMemoryPostRepository<'a> {
    pub fn new(uow: &'a InMemoryUnitOfWork) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository<'_> {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        self.uow.read(|tables| tables.post(id.get()))?
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let author_id = entity.author().id().ok_or_else(|| unsaved("post author"))?;

        self.uow.write(|tables| {
            require_member(tables, author_id)?;

            let id = match entity.id() {
                Some(id) => {
                    let row = tables.posts.get_mut(&id.get()).ok_or(RepoError::NotFound)?;
                    row.title = entity.title().to_string();
                    row.content = entity.content().to_string();
                    row.updated_at = entity.updated_at();
                    id.get()
                }
                None => {
                    let id = tables.next_post_id();
                    tables.posts.insert(
                        id,
                        PostRow {
                            title: entity.title().to_string(),
                            content: entity.content().to_string(),
                            author_id: author_id.get(),
                            created_at: entity.created_at(),
                            updated_at: entity.updated_at(),
                        },
                    );
                    id
                }
            };

            tables.post(id)?.ok_or(RepoError::NotFound)
        })
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository<'_> {
    async fn find_all_ordered_by_id_desc(
        &self,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);

        self.uow.read(|tables| {
            let items = tables
                .posts
                .keys()
                .rev()
                .skip(offset)
                .take(size)
                .filter_map(|id| tables.post(*id).transpose())
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Page::new(items, request, tables.posts.len() as u64))
        })?
    }

    async fn find_detail_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        self.uow.read(|tables| tables.post(id.get()))?
    }

    async fn delete(&self, post: Post) -> Result<(), RepoError> {
        let id = post.id().ok_or_else(|| unsaved("post"))?;

        self.uow.write(|tables| {
            tables.posts.remove(&id.get()).ok_or(RepoError::NotFound)?;
            // Mirrors ON DELETE CASCADE on comments.post_id.
            tables.comments.retain(|_, row| row.post_id != id.get());
            Ok(())
        })
    }
}

pub struct InMemoryCommentRepository<'a> {
    uow: &'a InMemoryUnitOfWork,
}

impl<'a> InMemoryCommentRepository<'a> {
    pub fn new(uow: &'a InMemoryUnitOfWork) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl BaseRepository<Comment, CommentId> for InMemoryCommentRepository<'_> {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepoError> {
        self.uow.read(|tables| {
            tables
                .comments
                .get(&id.get())
                .map(|row| tables.comment(id.get(), row))
                .transpose()
        })?
    }

    async fn save(&self, entity: Comment) -> Result<Comment, RepoError> {
        let author_id = entity.author().id().ok_or_else(|| unsaved("comment author"))?;
        let post_id = entity
            .post_id()
            .ok_or_else(|| RepoError::Constraint("comment is not bound to a post".to_string()))?;

        self.uow.write(|tables| {
            require_member(tables, author_id)?;
            if !tables.posts.contains_key(&post_id.get()) {
                return Err(RepoError::Constraint(format!(
                    "post {post_id} does not exist"
                )));
            }

            let id = match entity.id() {
                Some(id) => {
                    let row = tables
                        .comments
                        .get_mut(&id.get())
                        .ok_or(RepoError::NotFound)?;
                    row.content = entity.content().to_string();
                    row.post_id = post_id.get();
                    id.get()
                }
                None => {
                    let id = tables.next_comment_id();
                    tables.comments.insert(
                        id,
                        CommentRow {
                            content: entity.content().to_string(),
                            author_id: author_id.get(),
                            post_id: post_id.get(),
                            created_at: entity.created_at(),
                        },
                    );
                    id
                }
            };

            let row = tables.comments.get(&id).ok_or(RepoError::NotFound)?;
            tables.comment(id, row)
        })
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository<'_> {
    async fn delete(&self, comment: Comment) -> Result<(), RepoError> {
        let id = comment.id().ok_or_else(|| unsaved("comment"))?;

        self.uow.write(|tables| {
            tables
                .comments
                .remove(&id.get())
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        })
    }

    async fn delete_all_by_post(&self, post_id: PostId) -> Result<u64, RepoError> {
        self.uow.write(|tables| {
            let before = tables.comments.len();
            tables.comments.retain(|_, row| row.post_id != post_id.get());
            Ok((before - tables.comments.len()) as u64)
        })
    }
}
