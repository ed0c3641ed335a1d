use std::cell::RefCell;
use std::rc::Rc;

use tharsis::{
    CardEffect, CardName, CardType, Color, Continuation, DecisionNode, DeferredAction,
    EffectRegistry, GameError, GameId, GameOptions, GameState, OrOptions, Placement, Player,
    PlayerId, Progress, Resource, SelectAmount, SelectOption, play_card, process,
    request_decision,
};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn session(ids: &[&str], effects: EffectRegistry) -> GameState {
    let players = ids
        .iter()
        .zip(Color::ALL)
        .map(|(&id, color)| Player::new(PlayerId::new(id), id, color))
        .collect();
    GameState::with_effects(GameId::new("chain"), players, GameOptions::seeded(3), effects)
}

fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn logging(log: &Log, player: &PlayerId, label: &'static str) -> DeferredAction {
    let log = Rc::clone(log);
    DeferredAction::new(player.clone(), label, move |_| {
        log.borrow_mut().push(label);
        Ok(Continuation::Done)
    })
}

/// Queues A, which in turn queues B at the back and C at the front.
struct Scheduler {
    log: Log,
}

impl CardEffect for Scheduler {
    fn name(&self) -> CardName {
        CardName::FoodFactory
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let log = Rc::clone(&self.log);
        let owner = player.clone();
        game.deferred_actions.push(
            DeferredAction::new(player.clone(), "A", move |game| {
                log.borrow_mut().push("A");
                game.deferred_actions
                    .push(logging(&log, &owner, "B"), Placement::Back);
                game.deferred_actions
                    .push(logging(&log, &owner, "C"), Placement::Front);
                Ok(Continuation::Done)
            }),
            Placement::Back,
        );
        Ok(None)
    }
}

/// Asks for an amount, then chains into a confirmation.
struct Budget;

impl CardEffect for Budget {
    fn name(&self) -> CardName {
        CardName::GeneRepair
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn play(
        &self,
        _game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let id = player.clone();
        let node = SelectAmount::new("Budget", "Save", 5, move |game, amount| {
            game.player_mut(&id)?
                .add_resource(Resource::MegaCredits, amount);
            let id = id.clone();
            let confirm = SelectOption::new("Confirm budget", "Ok", move |game| {
                game.player_mut(&id)?
                    .add_production(Resource::MegaCredits, 1);
                Ok(Continuation::Done)
            });
            let choice = OrOptions::new("Keep or double", vec![confirm.into()]);
            Ok(Continuation::next(choice))
        });
        Ok(Some(node.into()))
    }
}

#[test]
fn front_placement_runs_before_earlier_back_placement() {
    let log: Log = Rc::default();
    let mut effects = EffectRegistry::new();
    effects.register(Box::new(Scheduler {
        log: Rc::clone(&log),
    }));
    let mut game = session(&["p1"], effects);
    let p1 = PlayerId::new("p1");

    assert_eq!(
        play_card(&mut game, &p1, CardName::FoodFactory).unwrap(),
        Progress::Idle
    );
    assert_eq!(*log.borrow(), vec!["A", "C", "B"]);
    assert!(game.deferred_actions.is_empty());
}

#[test]
fn chained_decisions_need_one_call_each() {
    let mut effects = EffectRegistry::new();
    effects.register(Box::new(Budget));
    let mut game = session(&["p1", "p2"], effects);
    let p1 = PlayerId::new("p1");

    assert_eq!(
        play_card(&mut game, &p1, CardName::GeneRepair).unwrap(),
        Progress::Waiting(p1.clone())
    );
    assert_eq!(
        process(&mut game, &p1, &rows(&[&["4"]])).unwrap(),
        Progress::Waiting(p1.clone())
    );
    assert_eq!(game.player(&p1).unwrap().mega_credits, 4);

    let err = process(&mut game, &p1, &rows(&[&["1"]])).unwrap_err();
    assert_eq!(err.to_string(), "Invalid option index");

    assert_eq!(
        process(&mut game, &p1, &rows(&[&["0"]])).unwrap(),
        Progress::Idle
    );
    assert_eq!(
        game.player(&p1).unwrap().production(Resource::MegaCredits),
        1
    );
    assert!(game.waiting.is_empty());
}

#[test]
fn or_bare_selector_answers_option_child() {
    let mut game = session(&["p1"], EffectRegistry::with_builtin_cards());
    let p1 = PlayerId::new("p1");

    play_card(&mut game, &p1, CardName::ArtificialPhotosynthesis).unwrap();
    assert_eq!(
        process(&mut game, &p1, &rows(&[&["1"]])).unwrap(),
        Progress::Idle
    );
    let player = game.player(&p1).unwrap();
    assert_eq!(player.production(Resource::Plants), 1);
    assert_eq!(player.production(Resource::Energy), 0);
}

#[test]
fn or_selector_routes_trailing_entries_to_child() {
    let mut game = session(&["p1"], EffectRegistry::new());
    let p1 = PlayerId::new("p1");

    let id = p1.clone();
    let skip = SelectOption::new("Skip", "Ok", |_| Ok(Continuation::Done));
    let gain = SelectAmount::new("Gain MC", "Gain", 5, move |game, amount| {
        game.player_mut(&id)?
            .add_resource(Resource::MegaCredits, amount);
        Ok(Continuation::Done)
    });
    let choice = OrOptions::new("Skip or gain", vec![skip.into(), gain.into()]);
    request_decision(&mut game, &p1, choice.into()).unwrap();

    let err = process(&mut game, &p1, &rows(&[&["1", "6"]])).unwrap_err();
    assert_eq!(err.to_string(), "Amount provided too high");
    assert!(game.waiting.is_waiting(&p1));

    assert_eq!(
        process(&mut game, &p1, &rows(&[&["1", "3"]])).unwrap(),
        Progress::Idle
    );
    assert_eq!(game.player(&p1).unwrap().mega_credits, 3);
}

#[test]
fn unregistered_card_is_an_error() {
    let mut game = session(&["p1"], EffectRegistry::new());
    let err = play_card(&mut game, &PlayerId::new("p1"), CardName::Fish).unwrap_err();
    assert_eq!(err, GameError::UnregisteredCard(CardName::Fish));
}
