//! Ownership and admin permission rules.

use crate::domain::entities::{Comment, Post, User};

/// Domain service for object-level permission checks.
///
/// Reads are open to any authenticated user; writes require authorship
/// or membership in the `Admin` group.
pub struct PermissionService;

impl PermissionService {
    /// Admin probe.
    pub fn is_admin(user: &User) -> bool {
        user.is_admin()
    }

    /// Author or admin may edit or delete a post.
    pub fn can_modify_post(user: &User, post: &Post) -> bool {
        post.is_authored_by(user.id) || Self::is_admin(user)
    }

    /// Author or admin may edit or delete a comment.
    pub fn can_modify_comment(user: &User, comment: &Comment) -> bool {
        comment.is_authored_by(user.id) || Self::is_admin(user)
    }

    /// A user may manage their own account; admins may manage any account.
    pub fn can_manage_user(actor: &User, target_id: i64) -> bool {
        actor.id == target_id || Self::is_admin(actor)
    }
}
