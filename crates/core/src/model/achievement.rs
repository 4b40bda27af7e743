use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog achievement, persisted as e.g. `"streak_10"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "accuracy_80")]
    Accuracy80,
    #[serde(rename = "accuracy_90")]
    Accuracy90,
    #[serde(rename = "accuracy_95")]
    Accuracy95,
    #[serde(rename = "streak_10")]
    Streak10,
    #[serde(rename = "streak_25")]
    Streak25,
    #[serde(rename = "problems_50")]
    Problems50,
    #[serde(rename = "problems_100")]
    Problems100,
    #[serde(rename = "problems_500")]
    Problems500,
}

impl AchievementId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AchievementId::Accuracy80 => "accuracy_80",
            AchievementId::Accuracy90 => "accuracy_90",
            AchievementId::Accuracy95 => "accuracy_95",
            AchievementId::Streak10 => "streak_10",
            AchievementId::Streak25 => "streak_25",
            AchievementId::Problems50 => "problems_50",
            AchievementId::Problems100 => "problems_100",
            AchievementId::Problems500 => "problems_500",
        }
    }

    /// Catalog entry for this id.
    #[must_use]
    pub fn achievement(self) -> &'static Achievement {
        // The catalog is declared in id order.
        &CATALOG[self as usize]
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What has to hold for an achievement to unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// Accuracy percentage of the session that just completed.
    SessionAccuracy(u32),
    /// Best lifetime streak.
    Streak(u32),
    /// Lifetime problems attempted.
    TotalProblems(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub milestone: Milestone,
}

pub static CATALOG: [Achievement; 8] = [
    Achievement {
        id: AchievementId::Accuracy80,
        name: "Getting Better",
        description: "Achieve 80% accuracy",
        icon: "🎯",
        milestone: Milestone::SessionAccuracy(80),
    },
    Achievement {
        id: AchievementId::Accuracy90,
        name: "Almost Perfect",
        description: "Achieve 90% accuracy",
        icon: "⭐",
        milestone: Milestone::SessionAccuracy(90),
    },
    Achievement {
        id: AchievementId::Accuracy95,
        name: "Math Master",
        description: "Achieve 95% accuracy",
        icon: "🏆",
        milestone: Milestone::SessionAccuracy(95),
    },
    Achievement {
        id: AchievementId::Streak10,
        name: "Hot Streak",
        description: "Get 10 problems correct in a row",
        icon: "🔥",
        milestone: Milestone::Streak(10),
    },
    Achievement {
        id: AchievementId::Streak25,
        name: "Unstoppable",
        description: "Get 25 problems correct in a row",
        icon: "⚡",
        milestone: Milestone::Streak(25),
    },
    Achievement {
        id: AchievementId::Problems50,
        name: "Dedicated Learner",
        description: "Complete 50 problems",
        icon: "📚",
        milestone: Milestone::TotalProblems(50),
    },
    Achievement {
        id: AchievementId::Problems100,
        name: "Century Club",
        description: "Complete 100 problems",
        icon: "💯",
        milestone: Milestone::TotalProblems(100),
    },
    Achievement {
        id: AchievementId::Problems500,
        name: "Math Champion",
        description: "Complete 500 problems",
        icon: "👑",
        milestone: Milestone::TotalProblems(500),
    },
];
