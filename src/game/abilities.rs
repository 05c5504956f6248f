//! Role ability resolvers.
//!
//! Each special role has one "act" capability. The low-level operations
//! (`see`, `heal`, `poison`, `revenge`, `choose_lovers`, `steal`) take an
//! already chosen target and enforce the role's preconditions; the `*_turn`
//! functions gather candidates, ask the decision provider, and apply the
//! answer. A failed precondition is a silent skip, never an error, so the
//! orchestrators can run their sequences unconditionally.

use crate::game::{
    ActionType, Actor, CandidateFilter, DecisionKind, DecisionProvider, Game, Player, PlayerId,
    Revenge, Role, SpecialState, ThiefState,
};

/// A role's turn: `(game, holder, provider)`.
pub type Resolver = fn(&mut Game, PlayerId, &mut dyn DecisionProvider);

/// Role → resolver lookup table. Villagers and werewolves have none.
#[must_use]
pub fn resolver_for(role: Role) -> Option<Resolver> {
    match role {
        Role::Cupid => Some(cupid_turn),
        Role::Thief => Some(thief_turn),
        Role::Seer => Some(seer_turn),
        Role::Witch => Some(witch_turn),
        Role::Hunter => Some(hunter_turn),
        Role::Villager | Role::Werewolf | Role::LittleGirl => None,
    }
}

fn special_mut(game: &mut Game, id: PlayerId) -> Option<&mut SpecialState> {
    game.player_mut(id).map(Player::special_mut)
}

// ---------------------------------------------------------------------------
// Seer
// ---------------------------------------------------------------------------

/// Investigate `target` and return their role.
///
/// No-op (returns `None`) unless `seer` is a living Seer, `target` is a
/// different living player, and `target` has not been investigated before.
pub fn see(game: &mut Game, seer: PlayerId, target: PlayerId) -> Option<Role> {
    if seer == target || !game.is_alive(seer) || !game.is_alive(target) {
        return None;
    }
    let (name, role) = {
        let t = game.player(target)?;
        (t.name.clone(), t.role())
    };
    let Some(SpecialState::Seer(state)) = special_mut(game, seer) else {
        return None;
    };
    if state.investigations.contains_key(&name) {
        tracing::debug!(target = %name, "already investigated");
        return None;
    }
    state.investigations.insert(name, role);
    game.record(Actor::Player(seer), ActionType::Reveal, target);
    tracing::debug!(target = %game.name(target), %role, "seer investigation");
    Some(role)
}

fn seer_turn(game: &mut Game, seer: PlayerId, provider: &mut dyn DecisionProvider) {
    let Some(state) = game.player(seer).and_then(Player::seer) else {
        return;
    };
    let unseen: Vec<PlayerId> = (0..game.players().len())
        .filter(|id| !state.investigations.contains_key(game.name(*id)))
        .collect();
    let kind = DecisionKind::SeerInvestigate;
    let filter = CandidateFilter::living_others();
    if let Some(target) = game.ask(provider, kind, Some(seer), Some(unseen.as_slice()), filter) {
        see(game, seer, target);
    }
}

// ---------------------------------------------------------------------------
// Witch
// ---------------------------------------------------------------------------

/// Save `target` from tonight's werewolf attack.
///
/// Only players in `recently_killed` can be saved, and only by a witch who is
/// alive or fell to the same attack. A lover who died in the same cascade
/// comes back too. Consumes the healing potion; returns the players brought
/// back.
pub fn heal(game: &mut Game, witch: PlayerId, target: PlayerId) -> Vec<PlayerId> {
    let witch_present = game.is_alive(witch) || game.recently_killed.contains(&witch);
    if !witch_present || !game.recently_killed.contains(&target) {
        return Vec::new();
    }
    let Some(SpecialState::Witch(state)) = special_mut(game, witch) else {
        return Vec::new();
    };
    if state.heal_used {
        return Vec::new();
    }
    state.heal_used = true;

    let mut saved = vec![target];
    if let Some(lover) = game.player(target).and_then(Player::lover) {
        if game.recently_killed.contains(&lover) {
            saved.push(lover);
        }
    }
    for id in &saved {
        game.revive(*id);
    }
    game.recently_killed.retain(|id| !saved.contains(id));
    game.record(Actor::Player(witch), ActionType::Heal, target);
    tracing::debug!(target = %game.name(target), "witch heal");
    saved
}

/// Poison a living `target` (the witch may pick herself).
///
/// Requires a living witch. Consumes the poison; returns everyone who died,
/// lover cascade included.
pub fn poison(game: &mut Game, witch: PlayerId, target: PlayerId) -> Vec<PlayerId> {
    if !game.is_alive(witch) || !game.is_alive(target) {
        return Vec::new();
    }
    let Some(SpecialState::Witch(state)) = special_mut(game, witch) else {
        return Vec::new();
    };
    if state.poison_used {
        return Vec::new();
    }
    state.poison_used = true;

    let victims = game.kill(target);
    game.record(Actor::Player(witch), ActionType::Poison, target);
    tracing::debug!(target = %game.name(target), "witch poison");
    victims
}

fn witch_turn(game: &mut Game, witch: PlayerId, provider: &mut dyn DecisionProvider) {
    // A witch killed tonight still wakes up and may save herself.
    if !game.is_alive(witch) && !game.recently_killed.contains(&witch) {
        return;
    }
    let Some(potions) = game.player(witch).and_then(Player::witch).copied() else {
        return;
    };

    let mut saved = Vec::new();
    if !potions.heal_used && !game.recently_killed.is_empty() {
        let victims = game.recently_killed.clone();
        let filter = CandidateFilter {
            alive: Some(false),
            ..CandidateFilter::living().or_none()
        };
        let kind = DecisionKind::WitchHeal;
        let pool = Some(victims.as_slice());
        if let Some(target) = game.ask(provider, kind, Some(witch), pool, filter) {
            saved = heal(game, witch, target);
        }
    }

    if !potions.poison_used && game.is_alive(witch) {
        let unsaved: Vec<PlayerId> = game.alive_ids().filter(|id| !saved.contains(id)).collect();
        let kind = DecisionKind::WitchPoison;
        let filter = CandidateFilter::living().or_none();
        let pool = Some(unsaved.as_slice());
        if let Some(target) = game.ask(provider, kind, Some(witch), pool, filter) {
            poison(game, witch, target);
        }
    }
}

// ---------------------------------------------------------------------------
// Hunter
// ---------------------------------------------------------------------------

/// Fire the dead hunter's shot at `target`.
///
/// At most once per game: requires a dead Hunter whose revenge is still
/// pending and a different living target. Returns everyone who died.
pub fn revenge(game: &mut Game, hunter: PlayerId, target: PlayerId) -> Vec<PlayerId> {
    if hunter == target || game.is_alive(hunter) || !game.is_alive(target) {
        return Vec::new();
    }
    let Some(SpecialState::Hunter(state)) = special_mut(game, hunter) else {
        return Vec::new();
    };
    if state.revenge != Revenge::Pending {
        return Vec::new();
    }
    state.revenge = Revenge::Shot(target);

    let victims = game.kill(target);
    game.reveal(&victims);
    game.record(Actor::Player(hunter), ActionType::RevengeKill, target);
    tracing::info!(hunter = %game.name(hunter), target = %game.name(target), "hunter revenge");
    victims
}

/// Whether `hunter` is a dead Hunter who still owes a shot.
#[must_use]
pub fn revenge_pending(game: &Game, hunter: PlayerId) -> bool {
    game.player(hunter)
        .is_some_and(|p| !p.alive && p.hunter().is_some_and(|h| h.revenge == Revenge::Pending))
}

fn hunter_turn(game: &mut Game, hunter: PlayerId, provider: &mut dyn DecisionProvider) {
    if !revenge_pending(game, hunter) {
        return;
    }
    let kind = DecisionKind::HunterRevenge;
    let choice = game.ask(provider, kind, Some(hunter), None, CandidateFilter::living_others());
    match choice {
        Some(target) => {
            revenge(game, hunter, target);
        }
        None => {
            if let Some(SpecialState::Hunter(state)) = special_mut(game, hunter) {
                state.revenge = Revenge::Waived;
            }
            tracing::debug!(hunter = %game.name(hunter), "hunter waived revenge");
        }
    }
}

// ---------------------------------------------------------------------------
// Cupid
// ---------------------------------------------------------------------------

/// Bind `first` and `second` as lovers.
///
/// At most once per game. Cupid may pick themself as one of the pair; the
/// two lovers must be different living players.
pub fn choose_lovers(game: &mut Game, cupid: PlayerId, first: PlayerId, second: PlayerId) -> bool {
    if first == second
        || !game.is_alive(cupid)
        || !game.is_alive(first)
        || !game.is_alive(second)
        || game.lovers().is_some()
    {
        return false;
    }
    let Some(SpecialState::Cupid(state)) = special_mut(game, cupid) else {
        return false;
    };
    if state.lovers_chosen.is_some() {
        return false;
    }
    state.lovers_chosen = Some((first, second));

    game.bind_lovers(first, second);
    game.record(Actor::Player(cupid), ActionType::ChooseLovers, first);
    game.record(Actor::Player(cupid), ActionType::ChooseLovers, second);
    tracing::debug!(first = %game.name(first), second = %game.name(second), "lovers bound");
    true
}

fn cupid_turn(game: &mut Game, cupid: PlayerId, provider: &mut dyn DecisionProvider) {
    if game.player(cupid).and_then(Player::cupid).is_none_or(|c| c.lovers_chosen.is_some()) {
        return;
    }
    let kind = DecisionKind::CupidFirstLover;
    let Some(first) = game.ask(provider, kind, Some(cupid), None, CandidateFilter::living()) else {
        return;
    };
    let rest: Vec<PlayerId> = game.alive_ids().filter(|id| *id != first).collect();
    let kind = DecisionKind::CupidSecondLover;
    let pool = Some(rest.as_slice());
    if let Some(second) = game.ask(provider, kind, Some(cupid), pool, CandidateFilter::living()) {
        choose_lovers(game, cupid, first, second);
    }
}

// ---------------------------------------------------------------------------
// Thief
// ---------------------------------------------------------------------------

/// Swap roles with `target`.
///
/// At most once per game. The thief takes the target's role together with
/// its ability state; the target receives the spent Thief card.
pub fn steal(game: &mut Game, thief: PlayerId, target: PlayerId) -> bool {
    if thief == target || !game.is_alive(thief) || !game.is_alive(target) {
        return false;
    }
    match game.player(thief).and_then(Player::thief) {
        Some(state) if !state.role_stolen => {}
        _ => return false,
    }
    let Some(victim) = game.player_mut(target) else {
        return false;
    };
    let stolen_role = victim.role();
    let stolen_state = std::mem::take(victim.special_mut());
    victim.assume(
        Role::Thief,
        SpecialState::Thief(ThiefState {
            role_stolen: true,
            original_role: Some(stolen_role),
        }),
    );
    if let Some(player) = game.player_mut(thief) {
        player.assume(stolen_role, stolen_state);
    }

    game.record(Actor::Player(thief), ActionType::StealRole, target);
    tracing::debug!(target = %game.name(target), role = %stolen_role, "thief stole role");
    true
}

fn thief_turn(game: &mut Game, thief: PlayerId, provider: &mut dyn DecisionProvider) {
    if game.player(thief).and_then(Player::thief).is_none_or(|t| t.role_stolen) {
        return;
    }
    let kind = DecisionKind::ThiefSteal;
    let filter = CandidateFilter::living_others().or_none();
    if let Some(target) = game.ask(provider, kind, Some(thief), None, filter) {
        steal(game, thief, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DecisionRequest, ScriptedDecisions};

    fn table() -> Game {
        Game::with_roles(&[
            ("Seer", Role::Seer),
            ("Witch", Role::Witch),
            ("Hunter", Role::Hunter),
            ("Cupid", Role::Cupid),
            ("Thief", Role::Thief),
            ("Wolf", Role::Werewolf),
            ("Vil", Role::Villager),
        ])
        .unwrap()
    }

    fn never(_: &DecisionRequest<'_>) -> Option<PlayerId> {
        None
    }

    #[test]
    fn test_resolver_table() {
        for role in [Role::Seer, Role::Witch, Role::Hunter, Role::Cupid, Role::Thief] {
            assert!(resolver_for(role).is_some(), "{role}");
        }
        for role in [Role::Villager, Role::Werewolf, Role::LittleGirl] {
            assert!(resolver_for(role).is_none(), "{role}");
        }
    }

    #[test]
    fn test_seer_sees_role_once() {
        let mut game = table();
        assert_eq!(see(&mut game, 0, 5), Some(Role::Werewolf));
        assert_eq!(see(&mut game, 0, 5), None);

        let seer = game.player(0).unwrap().seer().unwrap();
        assert_eq!(seer.investigations.len(), 1);
        assert_eq!(seer.investigations.get("Wolf"), Some(&Role::Werewolf));
        assert_eq!(game.log().of_type(ActionType::Reveal).count(), 1);
    }

    #[test]
    fn test_seer_cannot_see_self_or_dead() {
        let mut game = table();
        assert_eq!(see(&mut game, 0, 0), None);
        game.kill(6);
        assert_eq!(see(&mut game, 0, 6), None);
        // A non-seer cannot investigate
        assert_eq!(see(&mut game, 1, 5), None);
    }

    #[test]
    fn test_seer_turn_skips_when_no_one_left() {
        let mut game = table();
        for target in 1..7 {
            see(&mut game, 0, target);
        }
        let mut asked = false;
        let mut provider = |_: &DecisionRequest<'_>| -> Option<PlayerId> {
            asked = true;
            None
        };
        seer_turn(&mut game, 0, &mut provider);
        assert!(!asked);
    }

    #[test]
    fn test_heal_is_single_use() {
        let mut game = table();
        game.kill(6);
        game.kill(2);
        game.recently_killed = vec![6, 2];

        assert_eq!(heal(&mut game, 1, 6), vec![6]);
        assert!(game.is_alive(6));
        assert!(game.player(1).unwrap().witch().unwrap().heal_used);

        assert!(heal(&mut game, 1, 2).is_empty());
        assert!(!game.is_alive(2));
        assert_eq!(game.recently_killed(), &[2]);
    }

    #[test]
    fn test_heal_only_tonights_victims() {
        let mut game = table();
        game.kill(6);
        assert!(heal(&mut game, 1, 6).is_empty());
        assert!(!game.player(1).unwrap().witch().unwrap().heal_used);
    }

    #[test]
    fn test_heal_brings_back_cascaded_lover() {
        let mut game = table();
        game.bind_lovers(6, 0);
        game.recently_killed = game.kill(6);

        assert_eq!(heal(&mut game, 1, 6), vec![6, 0]);
        assert!(game.is_alive(6));
        assert!(game.is_alive(0));
        assert!(game.recently_killed().is_empty());
    }

    #[test]
    fn test_poison_single_use_and_self_allowed() {
        let mut game = table();
        assert_eq!(poison(&mut game, 1, 1), vec![1]);
        assert!(!game.is_alive(1));

        let mut game = table();
        assert_eq!(poison(&mut game, 1, 6), vec![6]);
        assert!(poison(&mut game, 1, 5).is_empty());
        assert!(game.is_alive(5));
    }

    #[test]
    fn test_dead_witch_brews_nothing() {
        let mut game = table();
        game.kill(1);
        assert!(poison(&mut game, 1, 6).is_empty());
        assert!(game.is_alive(6));

        // Dead since an earlier night: tonight's victim stays dead
        game.recently_killed = game.kill(6);
        assert!(heal(&mut game, 1, 6).is_empty());
        assert!(!game.is_alive(6));

        let potions = game.player(1).unwrap().witch().copied().unwrap();
        assert!(!potions.heal_used && !potions.poison_used);
    }

    #[test]
    fn test_witch_turn_heals_and_poisons_distinct_targets() {
        let mut game = table();
        game.recently_killed = game.kill(6);
        let mut script = ScriptedDecisions::new()
            .then(DecisionKind::WitchHeal, Some("Vil"))
            .then(DecisionKind::WitchPoison, Some("Wolf"));

        witch_turn(&mut game, 1, &mut script);
        assert!(game.is_alive(6));
        assert!(!game.is_alive(5));
        let potions = game.player(1).unwrap().witch().copied().unwrap();
        assert!(potions.heal_used && potions.poison_used);
    }

    #[test]
    fn test_witch_killed_tonight_can_save_herself() {
        let mut game = table();
        game.recently_killed = game.kill(1);
        let mut script = ScriptedDecisions::new().then(DecisionKind::WitchHeal, Some("Witch"));

        witch_turn(&mut game, 1, &mut script);
        assert!(game.is_alive(1));
    }

    #[test]
    fn test_witch_may_skip_both() {
        let mut game = table();
        game.recently_killed = game.kill(6);
        witch_turn(&mut game, 1, &mut never);
        assert!(!game.is_alive(6));
        assert_eq!(game.player(1).unwrap().witch().copied().unwrap(), Default::default());
    }

    #[test]
    fn test_hunter_revenge_at_most_once() {
        let mut game = table();
        assert!(revenge(&mut game, 2, 5).is_empty(), "living hunter cannot shoot");

        game.kill(2);
        assert_eq!(revenge(&mut game, 2, 5), vec![5]);
        assert!(!game.is_alive(5));
        assert!(game.player(5).unwrap().revealed);
        assert_eq!(game.player(2).unwrap().hunter().unwrap().revenge_target(), Some(5));

        assert!(revenge(&mut game, 2, 6).is_empty());
        assert!(game.is_alive(6));
    }

    #[test]
    fn test_hunter_revenge_cascades() {
        let mut game = table();
        game.bind_lovers(5, 6);
        game.kill(2);
        assert_eq!(revenge(&mut game, 2, 5), vec![5, 6]);
    }

    #[test]
    fn test_hunter_turn_waives_on_no_selection() {
        let mut game = table();
        game.kill(2);
        hunter_turn(&mut game, 2, &mut never);
        assert!(!revenge_pending(&game, 2));
        assert_eq!(game.player(2).unwrap().hunter().unwrap().revenge, Revenge::Waived);
    }

    #[test]
    fn test_cupid_binds_once() {
        let mut game = table();
        assert!(choose_lovers(&mut game, 3, 3, 5));
        assert_eq!(game.player(3).unwrap().lover(), Some(5));
        assert_eq!(game.player(5).unwrap().lover(), Some(3));
        assert_eq!(game.log().of_type(ActionType::ChooseLovers).count(), 2);

        assert!(!choose_lovers(&mut game, 3, 0, 1));
        assert!(game.player(0).unwrap().lover().is_none());
    }

    #[test]
    fn test_cupid_rejects_same_player_twice() {
        let mut game = table();
        assert!(!choose_lovers(&mut game, 3, 4, 4));
        assert!(game.lovers().is_none());
    }

    #[test]
    fn test_cupid_turn_asks_for_two_distinct_lovers() {
        let mut game = table();
        let mut provider = |req: &DecisionRequest<'_>| -> Option<PlayerId> {
            assert!(req.candidates.contains(&3), "cupid may pick themself");
            req.candidates.first().copied()
        };
        cupid_turn(&mut game, 3, &mut provider);
        assert_eq!(game.lovers(), Some((0, 1)));
    }

    #[test]
    fn test_thief_swaps_roles_both_ways() {
        let mut game = table();
        game.kill(6);
        game.recently_killed.clear();
        assert!(steal(&mut game, 4, 0));

        let thief = game.player(4).unwrap();
        assert_eq!(thief.role(), Role::Seer);
        assert!(thief.seer().is_some());
        assert_eq!(thief.dealt_role(), Role::Thief);

        let victim = game.player(0).unwrap();
        assert_eq!(victim.role(), Role::Thief);
        let card = victim.thief().unwrap();
        assert!(card.role_stolen);
        assert_eq!(card.original_role, Some(Role::Seer));

        // The spent card cannot steal again
        assert!(!steal(&mut game, 0, 5));
    }

    #[test]
    fn test_thief_keeps_stolen_ability_state() {
        let mut game = table();
        game.recently_killed = game.kill(6);
        heal(&mut game, 1, 6);
        assert!(steal(&mut game, 4, 1));
        assert!(game.player(4).unwrap().witch().unwrap().heal_used);
    }
}
