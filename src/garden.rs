/// The garden facade
///
/// `Garden` owns the repository and is the only way the outside world reads
/// or changes garden state. Every mutating operation takes `&mut self`, so
/// two top-level operations can never interleave. Mutations return
/// [`Saved`], which carries any persistence failures the operation absorbed.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::analytics::{self, DailySummary};
use crate::domain::{
    Achievement, CrisisResource, Forum, ForumId, ForumPost, ForumPostId, Habit, HabitCompletion,
    HabitId, JournalEntry, JournalEntryId, MoodEntry, NewForumPost, NewHabit, NewJournalEntry,
    NewMoodEntry, Plant, PlantType, PrivacyLevel, User, UserAchievement, UserId,
};
use crate::engine::{self, points, GardenError, GrowthOutcome, HabitCompletionOutcome};
use crate::repository::{Repository, Saved};
use crate::seed::{self, SeedReport};
use crate::storage::{CollectionKey, KeyValueStore};

/// Source of the current instant
///
/// Day boundaries (completion dates, "today" queries) are UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

/// A stored activity and the growth it earned
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<T> {
    pub record: T,
    /// None when the user has no plant
    pub growth: Option<GrowthOutcome>,
}

pub struct Garden<S: KeyValueStore> {
    repo: Repository<S>,
    clock: Clock,
    seed_report: SeedReport,
}

impl<S: KeyValueStore> Garden<S> {
    /// Open a garden on `store`, seeding reference data if needed
    pub fn open(store: S) -> Self {
        Self::with_clock(store, Clock::System)
    }

    pub fn with_clock(store: S, clock: Clock) -> Self {
        let mut repo = Repository::new(store);
        let seed_report = seed::initialize(&mut repo, clock.now());

        Self {
            repo,
            clock,
            seed_report,
        }
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// What the bootstrap did when this garden was opened
    pub fn seed_report(&self) -> &SeedReport {
        &self.seed_report
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn into_store(self) -> S {
        self.repo.into_store()
    }

    // Accounts

    /// Create an account and its seed-stage plant, and log it in
    ///
    /// Signing up with an email that is already registered logs that account
    /// in instead and returns it unchanged.
    pub fn signup(
        &mut self,
        email: &str,
        username: &str,
        display_name: &str,
        plant_type: PlantType,
    ) -> Result<Saved<User>, GardenError> {
        let now = self.begin();
        let email = User::normalize_email(email)?;

        if let Some(existing) = self.find_user_by_email(&email) {
            info!("Signup for already registered user {}", existing.id);
            self.repo.save_document(CollectionKey::CurrentUser, &existing);
            return Ok(self.finish(existing));
        }

        let user = self.repo.append(User::new(&email, username, display_name, plant_type, now)?);
        let plant = self.repo.append(Plant::new(user.id.clone(), plant_type, now));
        self.repo.save_document(CollectionKey::CurrentUser, &user);
        info!("Created user {} with a {} ({})", user.id, plant_type.as_str(), plant.id);

        Ok(self.finish(user))
    }

    /// Log in an existing account by email
    pub fn login(&mut self, email: &str) -> Result<Saved<User>, GardenError> {
        self.begin();
        let email = User::normalize_email(email)?;

        let user = self
            .find_user_by_email(&email)
            .ok_or(GardenError::UserNotFound { user: email })?;
        self.repo.save_document(CollectionKey::CurrentUser, &user);
        info!("User {} logged in", user.id);

        Ok(self.finish(user))
    }

    pub fn logout(&mut self) -> Saved<()> {
        self.begin();
        self.repo.remove_document(CollectionKey::CurrentUser);
        self.finish(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.repo.load_document(CollectionKey::CurrentUser)
    }

    /// The logged-in user, or `NoActiveUser`
    pub fn active_user(&self) -> Result<User, GardenError> {
        self.current_user().ok_or(GardenError::NoActiveUser)
    }

    pub fn user(&self, user_id: &UserId) -> Option<User> {
        self.repo.find_one::<User>(|u| &u.id == user_id)
    }

    pub fn set_privacy_level(
        &mut self,
        user_id: &UserId,
        level: PrivacyLevel,
    ) -> Result<Saved<User>, GardenError> {
        self.begin();

        let user = self
            .repo
            .update_where::<User>(|u| &u.id == user_id, |u| u.privacy_level = level)
            .ok_or_else(|| GardenError::UserNotFound {
                user: user_id.to_string(),
            })?;

        if self.current_user().is_some_and(|current| current.id == user.id) {
            self.repo.save_document(CollectionKey::CurrentUser, &user);
        }

        Ok(self.finish(user))
    }

    // Plant

    pub fn plant(&self, user_id: &UserId) -> Option<Plant> {
        self.repo.find_one::<Plant>(|p| &p.user_id == user_id)
    }

    /// Give `points` to the user's plant
    pub fn award_growth(
        &mut self,
        user_id: &UserId,
        points: i64,
    ) -> Result<Saved<GrowthOutcome>, GardenError> {
        let now = self.begin();
        let outcome = engine::award_growth(&mut self.repo, user_id, points, now)?;
        Ok(self.finish(outcome))
    }

    /// Water the plant: a small growth bonus and the watering streak
    pub fn water_plant(&mut self, user_id: &UserId) -> Result<Saved<GrowthOutcome>, GardenError> {
        let now = self.begin();

        self.repo
            .update_where::<Plant>(|p| &p.user_id == user_id, |p| p.record_watering(now))
            .ok_or_else(|| GardenError::PlantNotFound {
                user_id: user_id.to_string(),
            })?;
        let outcome = engine::award_growth(&mut self.repo, user_id, points::WATERING, now)?;

        Ok(self.finish(outcome))
    }

    // Mood

    pub fn add_mood_entry(
        &mut self,
        draft: NewMoodEntry,
    ) -> Result<Saved<Recorded<MoodEntry>>, GardenError> {
        let now = self.begin();
        let entry = self.repo.append(MoodEntry::create(draft, now)?);
        let growth = self.award_bonus(&entry.user_id, points::MOOD_ENTRY, now);

        Ok(self.finish(Recorded { record: entry, growth }))
    }

    /// Entries from the last `days` days, newest first
    ///
    /// A window reaching past the representable range has no lower bound.
    pub fn mood_entries(&self, user_id: &UserId, days: i64) -> Vec<MoodEntry> {
        let now = self.now();
        let cutoff = Duration::try_days(days).and_then(|window| now.checked_sub_signed(window));
        let mut entries = self.repo.list::<MoodEntry>(|m| {
            &m.user_id == user_id && cutoff.map_or(true, |cutoff| m.created_at >= cutoff)
        });
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }

    // Journal

    pub fn add_journal_entry(
        &mut self,
        draft: NewJournalEntry,
    ) -> Result<Saved<Recorded<JournalEntry>>, GardenError> {
        let now = self.begin();
        let entry = self.repo.append(JournalEntry::create(draft, now)?);
        let growth = self.award_bonus(&entry.user_id, points::JOURNAL_ENTRY, now);

        Ok(self.finish(Recorded { record: entry, growth }))
    }

    /// Change the title and/or content of one of the user's entries
    pub fn edit_journal_entry(
        &mut self,
        entry_id: &JournalEntryId,
        user_id: &UserId,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Saved<JournalEntry>, GardenError> {
        let now = self.begin();

        let entry = self
            .repo
            .try_update_where::<JournalEntry, _>(
                |e| &e.id == entry_id && &e.user_id == user_id,
                |e| e.edit(title, content, now),
            )?
            .ok_or_else(|| GardenError::JournalEntryNotFound {
                entry_id: entry_id.to_string(),
            })?;

        Ok(self.finish(entry))
    }

    /// The user's entries, newest first
    pub fn journal_entries(&self, user_id: &UserId) -> Vec<JournalEntry> {
        let mut entries = self.repo.list::<JournalEntry>(|j| &j.user_id == user_id);
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }

    // Habits

    pub fn add_habit(&mut self, draft: NewHabit) -> Result<Saved<Habit>, GardenError> {
        let now = self.begin();
        let habit = self.repo.append(Habit::create(draft, now)?);
        debug!("Created habit {} for user {}", habit.id, habit.user_id);

        Ok(self.finish(habit))
    }

    /// The user's active habits
    pub fn habits(&self, user_id: &UserId) -> Vec<Habit> {
        self.repo.list::<Habit>(|h| &h.user_id == user_id && h.is_active)
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<Habit> {
        self.repo.find_one::<Habit>(|h| &h.id == habit_id)
    }

    /// Stop showing a habit; its history is kept
    pub fn archive_habit(&mut self, habit_id: &HabitId) -> Result<Saved<Habit>, GardenError> {
        self.begin();

        let habit = self
            .repo
            .update_where::<Habit>(|h| &h.id == habit_id, |h| h.is_active = false)
            .ok_or_else(|| GardenError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })?;

        Ok(self.finish(habit))
    }

    pub fn complete_habit(
        &mut self,
        habit_id: &HabitId,
        user_id: &UserId,
        value: u32,
        notes: &str,
    ) -> Result<Saved<HabitCompletionOutcome>, GardenError> {
        let now = self.begin();
        let outcome = engine::complete_habit(&mut self.repo, habit_id, user_id, value, notes, now)?;
        Ok(self.finish(outcome))
    }

    /// Completions of a habit, newest first
    pub fn habit_completions(&self, habit_id: &HabitId) -> Vec<HabitCompletion> {
        let mut completions = self.repo.list::<HabitCompletion>(|c| &c.habit_id == habit_id);
        completions.sort_by(|a, b| {
            b.completion_date
                .cmp(&a.completion_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        completions
    }

    pub fn is_completed_today(&self, habit_id: &HabitId) -> bool {
        let today = self.now().date_naive();
        self.repo
            .find_one::<HabitCompletion>(|c| c.is_for(habit_id, today))
            .is_some()
    }

    // Community

    pub fn forums(&self) -> Vec<Forum> {
        self.repo.load::<Forum>()
    }

    pub fn forum(&self, forum_id: &ForumId) -> Option<Forum> {
        self.repo.find_one::<Forum>(|f| &f.id == forum_id)
    }

    /// Start a new thread
    pub fn add_forum_post(
        &mut self,
        draft: NewForumPost,
    ) -> Result<Saved<Recorded<ForumPost>>, GardenError> {
        let now = self.begin();
        let post = self.repo.append(ForumPost::top_level(draft, now)?);
        let growth = self.award_bonus(&post.user_id, points::FORUM_POST, now);

        Ok(self.finish(Recorded { record: post, growth }))
    }

    /// Reply to a top-level post
    pub fn reply_to_post(
        &mut self,
        parent_post_id: &ForumPostId,
        draft: NewForumPost,
    ) -> Result<Saved<Recorded<ForumPost>>, GardenError> {
        let now = self.begin();

        let parent = self
            .repo
            .find_one::<ForumPost>(|p| &p.id == parent_post_id)
            .ok_or_else(|| GardenError::ForumPostNotFound {
                post_id: parent_post_id.to_string(),
            })?;
        let reply = self.repo.append(ForumPost::reply_to(&parent, draft, now)?);

        self.repo.update_where::<ForumPost>(
            |p| p.id == parent.id,
            |p| {
                p.reply_count = p.reply_count.saturating_add(1);
                p.updated_at = now;
            },
        );
        let growth = self.award_bonus(&reply.user_id, points::FORUM_POST, now);

        Ok(self.finish(Recorded { record: reply, growth }))
    }

    /// Top-level posts in a forum, newest first
    pub fn forum_posts(&self, forum_id: &ForumId) -> Vec<ForumPost> {
        let mut posts = self
            .repo
            .list::<ForumPost>(|p| &p.forum_id == forum_id && !p.is_reply());
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Replies to a post, oldest first
    pub fn replies(&self, post_id: &ForumPostId) -> Vec<ForumPost> {
        let mut replies = self
            .repo
            .list::<ForumPost>(|p| p.parent_post_id.as_ref() == Some(post_id));
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        replies
    }

    // Reference data

    pub fn crisis_resources(&self) -> Vec<CrisisResource> {
        self.repo.load::<CrisisResource>()
    }

    pub fn achievement_catalog(&self) -> Vec<Achievement> {
        self.repo.load::<Achievement>()
    }

    pub fn user_achievements(&self, user_id: &UserId) -> Vec<UserAchievement> {
        self.repo.list::<UserAchievement>(|a| &a.user_id == user_id)
    }

    pub fn daily_summary(&self, user_id: &UserId) -> DailySummary {
        analytics::daily_summary(&self.repo, user_id, self.now())
    }

    /// Remove every document in the namespace
    pub fn clear(&mut self) -> Saved<()> {
        self.begin();
        for key in CollectionKey::ALL {
            self.repo.remove_document(key);
        }
        info!("Cleared all garden data");
        self.finish(())
    }

    /// Start a mutation: drop failures left by earlier queries
    fn begin(&mut self) -> DateTime<Utc> {
        self.repo.take_failures();
        self.now()
    }

    fn finish<T>(&self, value: T) -> Saved<T> {
        Saved::new(value, self.repo.take_failures())
    }

    /// Growth for a side activity; a user without a plant earns nothing
    fn award_bonus(&mut self, user_id: &UserId, points: i64, now: DateTime<Utc>) -> Option<GrowthOutcome> {
        match engine::award_growth(&mut self.repo, user_id, points, now) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!("No growth awarded: {}", e);
                None
            }
        }
    }

    fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.repo
            .find_one::<User>(|u| u.email.eq_ignore_ascii_case(email))
    }
}
