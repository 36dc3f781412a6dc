//! Reply-aware ordering of a flat message list.
//!
//! Threaded mode is a pre-order walk of every reply tree: a message is
//! followed by all of its descendants before its next sibling, siblings
//! keep timestamp order, and roots appear in the order they were sent.
//! Messages that cannot be reached from a root (dangling `reply_to_id`,
//! self replies, reply cycles) are appended afterwards. Each unresolved
//! chain is rooted at its topmost message, at depth 0, so nothing is ever
//! dropped and a reply still follows its parent.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{Message, ViewMode};

/// Order `messages` for display. The input is left untouched; the result
/// is an owned permutation of it.
///
/// In threaded mode an orphan (a reply whose parent is missing) is treated
/// as a synthetic root: its own replies nest under it before the next
/// orphan, rather than being appended flat.
pub fn organize(messages: &[Message], mode: ViewMode) -> Vec<Message> {
    let sorted = sort_chronologically(messages);
    match mode {
        ViewMode::Chronological => sorted,
        ViewMode::Threaded => thread_messages(sorted),
    }
}

fn sort_chronologically(messages: &[Message]) -> Vec<Message> {
    let mut sorted = messages.to_vec();
    // `sort_by` is stable: ties keep input order.
    sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    sorted
}

struct ThreadWalk<'a> {
    sorted: &'a [Message],
    replies: &'a HashMap<&'a str, Vec<usize>>,
    placed: Vec<bool>,
    order: Vec<(usize, usize)>,
}

impl<'a> ThreadWalk<'a> {
    /// Place `root` at depth 0 followed by its unplaced descendants.
    fn place_subtree(&mut self, root: usize) {
        let sorted = self.sorted;
        let replies = self.replies;
        let mut stack = vec![(root, 0usize)];
        // Ids of the ancestors of the message being placed.
        let mut path: Vec<&'a str> = Vec::new();

        while let Some((index, depth)) = stack.pop() {
            if self.placed[index] {
                continue;
            }
            path.truncate(depth);

            let message = &sorted[index];
            if path.contains(&message.id.as_str()) {
                warn!(id = %message.id, depth, "reply cycle detected, deferring message");
                continue;
            }

            self.placed[index] = true;
            self.order.push((index, depth));
            path.push(message.id.as_str());

            if let Some(children) = replies.get(message.id.as_str()) {
                // Reversed so the earliest reply is popped first.
                for &child in children.iter().rev() {
                    if !self.placed[child] {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
    }
}

/// Follow `reply_to_id` upwards from `start` through unplaced messages and
/// return the highest one reached. Stops at a missing parent, a placed
/// parent, or a parent already on the chain (a reply cycle).
fn unresolved_top(
    sorted: &[Message],
    by_id: &HashMap<&str, Vec<usize>>,
    placed: &[bool],
    start: usize,
) -> usize {
    let mut chain: HashSet<usize> = HashSet::from([start]);
    let mut current = start;

    while let Some(parent_id) = sorted[current].reply_to_id.as_deref() {
        let Some(candidates) = by_id.get(parent_id) else {
            debug!(id = %sorted[current].id, reply_to = parent_id, "orphaned reply, placing at top level");
            break;
        };
        let mut unplaced = candidates.iter().copied().filter(|&i| !placed[i]);
        let Some(parent) = unplaced.find(|i| !chain.contains(i)) else {
            if candidates.iter().any(|i| chain.contains(i)) {
                warn!(id = %sorted[current].id, reply_to = parent_id, "reply cycle detected, breaking it here");
            }
            break;
        };
        chain.insert(parent);
        current = parent;
    }
    current
}

fn thread_messages(sorted: Vec<Message>) -> Vec<Message> {
    let mut replies: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, message) in sorted.iter().enumerate() {
        if let Some(parent_id) = &message.reply_to_id {
            replies.entry(parent_id.as_str()).or_default().push(index);
        }
    }

    let mut walk = ThreadWalk {
        sorted: &sorted,
        replies: &replies,
        placed: vec![false; sorted.len()],
        order: Vec::with_capacity(sorted.len()),
    };

    for (index, message) in sorted.iter().enumerate() {
        if message.is_root() && !walk.placed[index] {
            walk.place_subtree(index);
        }
    }
    let threaded = walk.order.len();

    let mut by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, message) in sorted.iter().enumerate() {
        by_id.entry(message.id.as_str()).or_default().push(index);
    }
    for index in 0..sorted.len() {
        // Each round places the top of the chain, so this terminates.
        while !walk.placed[index] {
            let top = unresolved_top(&sorted, &by_id, &walk.placed, index);
            walk.place_subtree(top);
        }
    }
    let order = walk.order;
    debug!(
        total = sorted.len(),
        threaded,
        orphaned = order.len() - threaded,
        "organized messages"
    );

    let mut slots: Vec<Option<Message>> = sorted.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|(index, depth)| {
            slots[index].take().map(|mut message| {
                message.thread_depth = Some(depth);
                message
            })
        })
        .collect()
}

/// The "replying to" quote shown above a reply.
///
/// Returns `None` for root messages and `"Previous message"` when the
/// parent is not part of `messages`.
pub fn reply_preview(messages: &[Message], message: &Message, max_chars: usize) -> Option<String> {
    let parent_id = message.reply_to_id.as_deref()?;
    let preview = match messages.iter().find(|m| m.id == parent_id) {
        Some(parent) => {
            let mut snippet: String = parent.content.chars().take(max_chars).collect();
            if parent.content.chars().count() > max_chars {
                snippet.push_str("...");
            }
            format!("{}: {}", parent.sender_name, snippet)
        }
        None => "Previous message".to_string(),
    };
    Some(preview)
}
