// src/domain/comment/thread.rs
use crate::domain::comment::entity::Comment;
use crate::domain::comment::value_objects::CommentId;
use std::collections::HashMap;

/// Reply tree rebuilt from the flat comment rows of one article.
///
/// Comments live in a single `Vec`; parent/child links are positions into it,
/// so the tree owns no recursive structure. Sibling order follows the input
/// order. A comment whose parent is not part of the input is treated as a root.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
    positions: HashMap<CommentId, usize>,
    children: HashMap<CommentId, Vec<usize>>,
    roots: Vec<usize>,
}

impl CommentThread {
    pub fn from_flat(comments: Vec<Comment>) -> Self {
        let positions: HashMap<CommentId, usize> = comments
            .iter()
            .enumerate()
            .map(|(idx, comment)| (comment.id, idx))
            .collect();

        let mut children: HashMap<CommentId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (idx, comment) in comments.iter().enumerate() {
            match comment.parent_id {
                Some(parent) if positions.contains_key(&parent) => {
                    children.entry(parent).or_default().push(idx);
                }
                _ => roots.push(idx),
            }
        }

        Self {
            comments,
            positions,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.positions.get(&id).map(|&idx| &self.comments[idx])
    }

    pub fn roots(&self) -> impl Iterator<Item = &Comment> {
        self.roots.iter().map(|&idx| &self.comments[idx])
    }

    pub fn replies(&self, id: CommentId) -> impl Iterator<Item = &Comment> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.comments[idx])
    }

    /// Zero for roots, `None` for ids outside the thread.
    pub fn depth(&self, id: CommentId) -> Option<usize> {
        let mut current = self.get(id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent_id.and_then(|p| self.get(p)) {
            depth += 1;
            if depth > self.comments.len() {
                break;
            }
            current = parent;
        }
        Some(depth)
    }

    /// All replies below `id`, depth-first, excluding `id` itself.
    pub fn descendants(&self, id: CommentId) -> Vec<&Comment> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self
            .children
            .get(&id)
            .map(|c| c.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(idx) = stack.pop() {
            let comment = &self.comments[idx];
            out.push(comment);
            if let Some(kids) = self.children.get(&comment.id) {
                stack.extend(kids.iter().rev());
            }
        }
        out
    }

    /// Depth-first walk over the whole thread, yielding `(depth, comment)`.
    pub fn walk(&self) -> Vec<(usize, &Comment)> {
        let mut out = Vec::with_capacity(self.comments.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&idx| (0, idx)).collect();

        while let Some((depth, idx)) = stack.pop() {
            let comment = &self.comments[idx];
            out.push((depth, comment));
            if let Some(kids) = self.children.get(&comment.id) {
                stack.extend(kids.iter().rev().map(|&k| (depth + 1, k)));
            }
        }
        out
    }

    /// Gives back the flat list in the order it was built from.
    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
    }
}
