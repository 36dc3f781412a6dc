use std::collections::{HashMap, HashSet};

use counter::Counter;

use crate::models::Message;

/// Shape of an organized conversation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreadSummary {
    pub total_messages: usize,
    pub root_count: usize,
    pub reply_count: usize,
    /// Replies whose parent is not in the collection.
    pub orphan_count: usize,
    pub max_depth: usize,
    /// Direct replies per message id, for the UI's reply badge.
    pub replies_per_message: HashMap<String, usize>,
    /// Messages per sender name, most active first.
    pub participation: Vec<(String, usize)>,
}

impl ThreadSummary {
    pub fn from_organized(messages: &[Message]) -> Self {
        let known: HashSet<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        let mut summary = ThreadSummary {
            total_messages: messages.len(),
            ..Default::default()
        };
        let mut senders: Counter<String> = Counter::new();

        for message in messages {
            match message.reply_to_id.as_deref() {
                None => summary.root_count += 1,
                Some(parent_id) if known.contains(parent_id) => {
                    summary.reply_count += 1;
                    *summary
                        .replies_per_message
                        .entry(parent_id.to_string())
                        .or_insert(0) += 1;
                }
                Some(_) => summary.orphan_count += 1,
            }
            summary.max_depth = summary.max_depth.max(message.thread_depth.unwrap_or(0));

            let sender = if message.sender_name.is_empty() {
                "(unknown)".to_string()
            } else {
                message.sender_name.clone()
            };
            senders[&sender] += 1;
        }

        let mut participation = senders.most_common();
        // Counter breaks ties arbitrarily; keep the report stable.
        participation.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        summary.participation = participation;
        summary
    }

    pub fn print_summary(&self) {
        println!("\n=== Thread Summary ===");
        println!("Messages:      {}", self.total_messages);
        println!("Threads:       {}", self.root_count);
        println!("Replies:       {}", self.reply_count);
        println!("Orphaned:      {}", self.orphan_count);
        println!("Deepest level: {}", self.max_depth);

        let mut busiest: Vec<(&String, &usize)> = self.replies_per_message.iter().collect();
        busiest.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        if !busiest.is_empty() {
            println!("Most replied-to:");
            for (id, count) in busiest.iter().take(5) {
                println!("  {:<20} {} replies", id, count);
            }
        }
    }

    pub fn print_participation_analysis(&self) {
        println!("\n=== Participation ===");
        if self.participation.is_empty() {
            println!("No messages.");
            return;
        }
        for (sender, count) in &self.participation {
            let share = *count as f64 / self.total_messages as f64 * 100.0;
            println!("  {:<20} {:>4} messages ({:.1}%)", sender, count, share);
        }
    }
}
