//! Domain entities rendered into page payloads.

use blog_core::domain::{Article, Comment};
use blog_shared::view::{ArticleView, CommentView};

pub fn article_view(article: Article) -> ArticleView {
    ArticleView {
        id: article.id,
        user_id: article.user_id,
        title: article.title,
        body: article.body,
        created_at: article.created_at,
        updated_at: article.updated_at,
    }
}

/// Commenter emails are never published.
pub fn comment_view(comment: Comment) -> CommentView {
    CommentView {
        id: comment.id,
        article_id: comment.article_id,
        nickname: comment.nickname,
        website: comment.website,
        body: comment.body,
        created_at: comment.created_at,
    }
}

pub fn article_views(articles: Vec<Article>) -> Vec<ArticleView> {
    articles.into_iter().map(article_view).collect()
}
