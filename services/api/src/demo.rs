use crate::infra::{
    InMemoryEventPublisher, InMemoryRatingPersistence, InMemoryTeamRepository, PermissiveFileStore,
};
use clap::Args;
use hackfest::error::AppError;
use hackfest::workflows::judging::{
    CriterionScores, JudgeId, JudgingService, LeaderboardEntry, RatingStore,
};
use hackfest::workflows::registration::{
    ApplicationStatus, NewTeam, PaymentStatus, RegistrationService, TeamType, Track,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the final leaderboard as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Skip the payment portion of the walkthrough
    #[arg(long)]
    pub(crate) skip_payments: bool,
}

struct Roster {
    name: &'static str,
    team_type: TeamType,
    member_count: u8,
    track: Track,
    scores: &'static [[u8; 5]],
    shortlist: bool,
}

const ROSTER: &[Roster] = &[
    Roster {
        name: "nullpointers",
        team_type: TeamType::Team,
        member_count: 3,
        track: Track::AiMl,
        scores: &[[9, 8, 10, 7, 9], [7, 7, 7, 7, 7]],
        shortlist: true,
    },
    Roster {
        name: "stack-smashers",
        team_type: TeamType::Team,
        member_count: 4,
        track: Track::Fintech,
        scores: &[[8, 9, 7, 8, 8], [8, 8, 8, 7, 9]],
        shortlist: true,
    },
    Roster {
        name: "solo-segfault",
        team_type: TeamType::Individual,
        member_count: 1,
        track: Track::OpenInnovation,
        scores: &[[6, 7, 8, 6, 7]],
        shortlist: true,
    },
    Roster {
        name: "paper-planes",
        team_type: TeamType::Team,
        member_count: 2,
        track: Track::Healthtech,
        scores: &[],
        shortlist: false,
    },
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryTeamRepository::default());
    let events = Arc::new(InMemoryEventPublisher::default());
    let files = Arc::new(PermissiveFileStore);
    let ratings = Arc::new(RatingStore::new());
    let persistence = Arc::new(InMemoryRatingPersistence::default());

    let registration = RegistrationService::new(
        repository.clone(),
        events.clone(),
        files,
        ratings.clone(),
    );
    let judging = JudgingService::new(repository, ratings, persistence);

    println!("Hackfest event demo");
    println!("===================");

    let mut shortlisted = Vec::new();
    for entry in ROSTER {
        let team = registration.register_team(NewTeam {
            name: entry.name.to_string(),
            team_type: entry.team_type,
            member_count: entry.member_count,
            track: entry.track,
            proposal_ref: None,
        })?;
        println!(
            "registered {:<16} [{}] -> {}",
            team.name,
            entry.track.label(),
            team.application_status
        );

        let proposal = format!("s3://hackfest/proposals/{}.pdf", entry.name);
        let team = registration.submit_proposal(&team.id, &proposal)?;
        let team = registration.set_application_status(&team.id, ApplicationStatus::UnderReview)?;

        let decision = if entry.shortlist {
            ApplicationStatus::Shortlisted
        } else {
            ApplicationStatus::Rejected
        };
        let team = registration.set_application_status(&team.id, decision)?;
        println!("reviewed   {:<16} -> {}", team.name, team.application_status);

        if entry.shortlist {
            if !args.skip_payments {
                let proof = format!("s3://hackfest/payments/{}.png", entry.name);
                registration.submit_payment(&team.id, &proof)?;
                registration.set_payment_status(&team.id, PaymentStatus::Approved)?;
                println!("payment    {:<16} -> approved", team.name);
            }
            shortlisted.push((team, entry.scores));
        }
    }

    println!();
    for (team, score_sets) in &shortlisted {
        for (index, values) in score_sets.iter().enumerate() {
            let judge = JudgeId(format!("judge-{}", index + 1));
            judging.upsert_rating(
                judge,
                team.id.clone(),
                CriterionScores {
                    innovation: values[0],
                    technicality: values[1],
                    presentation: values[2],
                    feasibility: values[3],
                    impact: values[4],
                },
                None,
            )?;
        }
        let aggregate = judging.aggregate(&team.id)?;
        println!(
            "scored     {:<16} overall {:.2} across {} judge(s)",
            team.name, aggregate.overall, aggregate.judge_count
        );
    }

    let board = judging.leaderboard()?;
    println!();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&board).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        render_leaderboard(&board);
    }

    println!();
    println!("{} lifecycle event(s) emitted", events.events().len());
    Ok(())
}

fn render_leaderboard(board: &[LeaderboardEntry]) {
    println!("Leaderboard");
    println!("-----------");
    for entry in board {
        println!(
            "#{:<2} {:<16} overall {:.2} ({} judge(s))",
            entry.rank, entry.team_name, entry.overall, entry.judge_count
        );
    }
    if board.is_empty() {
        println!("no shortlisted teams have been rated yet");
    }
}
