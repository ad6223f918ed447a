//! In-memory assembly of enriched read models.
//!
//! Both storage adapters fetch flat records in batches and join them here, so
//! the shape of a thread or profile does not depend on the backend. Input
//! order is preserved within every group.

use std::collections::HashMap;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    AuthoredTweet, Follow, FollowView, GivenLike, Like, LikeView, LikedTweet, ThreadReply, Tweet,
    TweetId, TweetThread, User, UserId, UserProfile, UserRelations, UserSummary,
};

/// Index user summaries by identifier.
pub(crate) fn index_summaries<I>(summaries: I) -> HashMap<UserId, UserSummary>
where
    I: IntoIterator<Item = UserSummary>,
{
    summaries
        .into_iter()
        .map(|summary| (summary.id, summary))
        .collect()
}

fn lookup(
    summaries: &HashMap<UserId, UserSummary>,
    id: UserId,
    context: &str,
) -> Result<UserSummary, RepositoryError> {
    summaries
        .get(&id)
        .cloned()
        .ok_or_else(|| {
            RepositoryError::query(format!("user {id} referenced by {context} is missing"))
        })
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Join root tweets with their replies, likes and authors.
///
/// `replies` and `likes` may contain records for tweets outside `roots`; they
/// are ignored.
pub(crate) fn assemble_threads(
    roots: Vec<Tweet>,
    replies: Vec<Tweet>,
    likes: Vec<Like>,
    authors: &HashMap<UserId, UserSummary>,
) -> Result<Vec<TweetThread>, RepositoryError> {
    let mut replies_by_parent: HashMap<TweetId, Vec<ThreadReply>> = HashMap::new();
    for reply in replies {
        let Some(parent) = reply.reply_to_id else {
            continue;
        };
        let author = lookup(authors, reply.author_id, "a reply")?;
        replies_by_parent
            .entry(parent)
            .or_default()
            .push(ThreadReply {
                tweet: reply,
                author,
            });
    }

    let mut likes_by_tweet: HashMap<TweetId, Vec<Like>> = HashMap::new();
    for like in likes {
        likes_by_tweet.entry(like.tweet_id).or_default().push(like);
    }

    roots
        .into_iter()
        .map(|tweet| {
            let author = lookup(authors, tweet.author_id, "a tweet")?;
            let replies = replies_by_parent.remove(&tweet.id).unwrap_or_default();
            let likes = likes_by_tweet.remove(&tweet.id).unwrap_or_default();
            Ok(TweetThread {
                author,
                reply_count: count(replies.len()),
                like_count: count(likes.len()),
                replies,
                likes,
                tweet,
            })
        })
        .collect()
}

/// Attach tweets, likes and follow relations to every user.
pub(crate) fn assemble_profiles(
    users: Vec<User>,
    tweets: Vec<Tweet>,
    likes: Vec<Like>,
    follows: Vec<Follow>,
) -> Vec<UserProfile> {
    let summaries = index_summaries(users.iter().map(User::summary));
    let mut relations: HashMap<UserId, UserRelations> = users
        .iter()
        .map(|user| (user.id, UserRelations::default()))
        .collect();

    for tweet in tweets {
        if let Some(entry) = relations.get_mut(&tweet.author_id) {
            entry.tweets.push(AuthoredTweet {
                id: tweet.id,
                content: tweet.content,
                created_at: tweet.created_at,
            });
        }
    }
    for like in likes {
        if let Some(entry) = relations.get_mut(&like.user_id) {
            entry.likes.push(GivenLike {
                id: like.id,
                tweet_id: like.tweet_id,
                created_at: like.created_at,
            });
        }
    }
    for follow in follows {
        if let (Some(follower), Some(followee)) = (
            summaries.get(&follow.follower_id),
            summaries.get(&follow.followee_id),
        ) {
            if let Some(entry) = relations.get_mut(&follow.follower_id) {
                entry.following.push(followee.clone());
            }
            if let Some(entry) = relations.get_mut(&follow.followee_id) {
                entry.followers.push(follower.clone());
            }
        }
    }

    users
        .into_iter()
        .map(|user| {
            let relations = relations.remove(&user.id).unwrap_or_default();
            UserProfile {
                user,
                relations: Some(relations),
            }
        })
        .collect()
}

/// Join likes with their users and tweets.
pub(crate) fn assemble_like_views(
    likes: Vec<Like>,
    users: &HashMap<UserId, UserSummary>,
    tweets: &HashMap<TweetId, LikedTweet>,
) -> Result<Vec<LikeView>, RepositoryError> {
    likes
        .into_iter()
        .map(|like| {
            let user = lookup(users, like.user_id, "a like")?;
            let tweet = tweets.get(&like.tweet_id).cloned().ok_or_else(|| {
                let missing = like.tweet_id;
                RepositoryError::query(format!("tweet {missing} referenced by a like is missing"))
            })?;
            Ok(LikeView { like, user, tweet })
        })
        .collect()
}

/// Join follow edges with both users.
pub(crate) fn assemble_follow_views(
    follows: Vec<Follow>,
    users: &HashMap<UserId, UserSummary>,
) -> Result<Vec<FollowView>, RepositoryError> {
    follows
        .into_iter()
        .map(|follow| {
            let follower = lookup(users, follow.follower_id, "a follow")?;
            let followee = lookup(users, follow.followee_id, "a follow")?;
            Ok(FollowView {
                follow,
                follower,
                followee,
            })
        })
        .collect()
}
