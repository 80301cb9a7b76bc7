//! Door controllers: a trivia question gating a pair of linked door tiles.
//!
//! A controller owns the shared door record. Its two [`DoorTile`]s, one in each
//! adjacent room, only hold a weak back-reference to that record, so both sides
//! always report the same [`DoorState`] and nothing is duplicated.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::listeners::{ListenerId, Listeners};
use crate::question::{
    AnswerCallback, QuestionError, QuestionResult, SharedQuestionHandler, TriviaQuestion,
};
use crate::tile::TileId;

/// Index of a door controller within its maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorId(pub u32);

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "door#{}", self.0)
    }
}

/// Lock state shared by both tiles of a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    /// Question not answered yet (or cancelled); approaching asks it.
    #[default]
    Unanswered,
    /// Answered incorrectly; permanently impassable.
    Locked,
    /// Answered correctly; permanently passable.
    Open,
}

impl DoorState {
    fn after(result: QuestionResult) -> Self {
        match result {
            QuestionResult::Correct => DoorState::Open,
            QuestionResult::Incorrect => DoorState::Locked,
            QuestionResult::Cancelled => DoorState::Unanswered,
        }
    }

    pub fn tile_id(self) -> TileId {
        match self {
            DoorState::Unanswered => TileId::DoorUnanswered,
            DoorState::Locked => TileId::DoorLocked,
            DoorState::Open => TileId::DoorOpen,
        }
    }
}

/// Which of the controller's two tiles: the one in the room that created the
/// door, or the one in its top/right neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorSide {
    Near,
    Far,
}

impl DoorSide {
    pub const fn index(self) -> usize {
        match self {
            DoorSide::Near => 0,
            DoorSide::Far => 1,
        }
    }
}

pub type DoorListener = dyn FnMut(&DoorController);

struct DoorRecord {
    id: DoorId,
    question: TriviaQuestion,
    state: DoorState,
    handler: Option<SharedQuestionHandler>,
    listeners: Listeners<DoorListener>,
}

type SharedRecord = Rc<RefCell<DoorRecord>>;

/// Owns one trivia question and the pair of door tiles it gates.
pub struct DoorController {
    record: SharedRecord,
    doors: [DoorTile; 2],
}

impl DoorController {
    pub fn new(id: DoorId, question: TriviaQuestion) -> Self {
        let record = Rc::new(RefCell::new(DoorRecord {
            id,
            question,
            state: DoorState::Unanswered,
            handler: None,
            listeners: Listeners::new(),
        }));
        Self::from_record(record)
    }

    fn from_record(record: SharedRecord) -> Self {
        let id = record.borrow().id;
        let doors = [DoorSide::Near, DoorSide::Far].map(|side| DoorTile {
            door: id,
            side,
            record: Rc::downgrade(&record),
        });
        Self { record, doors }
    }

    pub fn id(&self) -> DoorId {
        self.record.borrow().id
    }

    pub fn question(&self) -> TriviaQuestion {
        self.record.borrow().question.clone()
    }

    pub fn state(&self) -> DoorState {
        self.record.borrow().state
    }

    /// The two linked tiles, `[near, far]`.
    pub fn doors(&self) -> &[DoorTile; 2] {
        &self.doors
    }

    pub fn door(&self, side: DoorSide) -> &DoorTile {
        &self.doors[side.index()]
    }

    /// Injects the handler questions are sent to.
    ///
    /// Until a handler is set, approaching an unanswered door does nothing.
    pub fn set_handler(&self, handler: SharedQuestionHandler) {
        self.record.borrow_mut().handler = Some(handler);
    }

    pub fn add_update_listener(
        &self,
        listener: impl FnMut(&DoorController) + 'static,
    ) -> ListenerId {
        self.record.borrow_mut().listeners.add(Box::new(listener))
    }

    pub fn remove_update_listener(&self, id: ListenerId) -> bool {
        self.record.borrow_mut().listeners.remove(id)
    }

    /// Overwrites the state without notifying; used when restoring a save.
    pub(crate) fn restore_state(&self, state: DoorState) {
        self.record.borrow_mut().state = state;
    }

    fn notify(record: &SharedRecord) {
        let mut listeners = record.borrow_mut().listeners.detach();
        let view = DoorController::from_record(Rc::clone(record));
        listeners.for_each(|listener| listener(&view));
        record.borrow_mut().listeners.reattach(listeners);
    }

    fn transition(record: &SharedRecord, result: QuestionResult) {
        {
            let mut door = record.borrow_mut();
            door.state = DoorState::after(result);
            debug!(door = %door.id, %result, state = %door.state, "door question resolved");
        }
        Self::notify(record);
    }

    fn trigger_question(record: &SharedRecord) {
        let (id, question, handler) = {
            let door = record.borrow();
            (door.id, door.question.clone(), door.handler.clone())
        };

        let Some(handler) = handler else {
            warn!(door = %id, "door has no question handler; staying closed");
            return;
        };

        let link = Rc::downgrade(record);
        let callback = AnswerCallback::new(move |result| {
            if let Some(record) = link.upgrade() {
                DoorController::transition(&record, result);
            }
        });

        let asked = match handler.try_borrow_mut() {
            Ok(mut handler) => handler.ask_question(question, callback),
            Err(_) => Err(QuestionError::Rejected),
        };

        if let Err(error) = asked {
            warn!(door = %id, %error, "question handler refused door question");
            record.borrow_mut().state = DoorState::Unanswered;
        }

        Self::notify(record);
    }
}

impl fmt::Debug for DoorController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let door = self.record.borrow();
        f.debug_struct("DoorController")
            .field("id", &door.id)
            .field("state", &door.state)
            .field("question", &door.question.question())
            .field("has_handler", &door.handler.is_some())
            .field("listeners", &door.listeners)
            .finish()
    }
}

/// One side of a door, placed in a room's tile grid.
#[derive(Clone)]
pub struct DoorTile {
    door: DoorId,
    side: DoorSide,
    record: Weak<RefCell<DoorRecord>>,
}

impl DoorTile {
    pub fn door_id(&self) -> DoorId {
        self.door
    }

    pub fn side(&self) -> DoorSide {
        self.side
    }

    /// State of the owning controller. A tile whose controller is gone reads
    /// as locked.
    pub fn state(&self) -> DoorState {
        self.record
            .upgrade()
            .map(|record| record.borrow().state)
            .unwrap_or(DoorState::Locked)
    }

    pub fn tile_id(&self) -> TileId {
        self.state().tile_id()
    }

    /// Attempts to step onto this door.
    ///
    /// An unanswered door asks its question and keeps the player in place;
    /// open doors let the player through, locked doors never do.
    pub fn try_move_to(&self) -> bool {
        let Some(record) = self.record.upgrade() else {
            return false;
        };

        let state = record.borrow().state;
        match state {
            DoorState::Unanswered => {
                DoorController::trigger_question(&record);
                false
            }
            DoorState::Open => true,
            DoorState::Locked => false,
        }
    }
}

impl fmt::Debug for DoorTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoorTile")
            .field("door", &self.door)
            .field("side", &self.side)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{QuestionHandler, QuestionType};
    use std::cell::Cell;

    /// Handler that parks the callback so tests can resolve it by hand.
    #[derive(Default)]
    struct ParkingHandler {
        asked: usize,
        callback: Option<AnswerCallback>,
        busy: bool,
    }

    impl QuestionHandler for ParkingHandler {
        fn ask_question(
            &mut self,
            _question: TriviaQuestion,
            callback: AnswerCallback,
        ) -> Result<(), QuestionError> {
            if self.busy {
                return Err(QuestionError::Rejected);
            }
            self.asked += 1;
            self.callback = Some(callback);
            Ok(())
        }
    }

    fn controller_with_handler() -> (DoorController, Rc<RefCell<ParkingHandler>>) {
        let controller = DoorController::new(
            DoorId(0),
            TriviaQuestion::new("Test Question", "Test Answer", QuestionType::TrueFalse),
        );
        let handler = Rc::new(RefCell::new(ParkingHandler::default()));
        controller.set_handler(handler.clone());
        (controller, handler)
    }

    fn resolve(handler: &Rc<RefCell<ParkingHandler>>, result: QuestionResult) {
        let callback = handler.borrow_mut().callback.take().expect("question was asked");
        callback.call(result);
    }

    #[test]
    fn starts_unanswered_on_both_sides() {
        let (controller, _) = controller_with_handler();

        assert_eq!(controller.state(), DoorState::Unanswered);
        for tile in controller.doors() {
            assert_eq!(tile.state(), DoorState::Unanswered);
            assert_eq!(tile.tile_id(), TileId::DoorUnanswered);
            assert_eq!(tile.door_id(), DoorId(0));
        }
        assert_eq!(controller.doors()[0].side(), DoorSide::Near);
        assert_eq!(controller.doors()[1].side(), DoorSide::Far);
    }

    #[test]
    fn unanswered_door_asks_and_blocks() {
        let (controller, handler) = controller_with_handler();
        let updates = Rc::new(Cell::new(0));
        let sink = Rc::clone(&updates);
        controller.add_update_listener(move |_| sink.set(sink.get() + 1));

        assert!(!controller.doors()[0].try_move_to());

        assert_eq!(handler.borrow().asked, 1);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn results_drive_state_on_both_tiles() {
        for (result, expected) in [
            (QuestionResult::Correct, DoorState::Open),
            (QuestionResult::Incorrect, DoorState::Locked),
            (QuestionResult::Cancelled, DoorState::Unanswered),
        ] {
            let (controller, handler) = controller_with_handler();
            controller.doors()[1].try_move_to();
            resolve(&handler, result);

            assert_eq!(controller.state(), expected);
            assert_eq!(controller.doors()[0].state(), expected);
            assert_eq!(controller.doors()[1].state(), expected);
        }
    }

    #[test]
    fn open_and_locked_doors_do_not_ask_again() {
        let (controller, handler) = controller_with_handler();
        controller.doors()[0].try_move_to();
        resolve(&handler, QuestionResult::Correct);

        assert!(controller.doors()[0].try_move_to());
        assert!(controller.doors()[1].try_move_to());
        assert_eq!(handler.borrow().asked, 1);

        let (controller, handler) = controller_with_handler();
        controller.doors()[0].try_move_to();
        resolve(&handler, QuestionResult::Incorrect);

        assert!(!controller.doors()[0].try_move_to());
        assert!(!controller.doors()[1].try_move_to());
        assert_eq!(handler.borrow().asked, 1);
    }

    #[test]
    fn cancelled_door_asks_again() {
        let (controller, handler) = controller_with_handler();
        controller.doors()[0].try_move_to();
        resolve(&handler, QuestionResult::Cancelled);

        assert!(!controller.doors()[0].try_move_to());
        assert_eq!(handler.borrow().asked, 2);
    }

    #[test]
    fn rejected_question_resets_and_still_notifies() {
        let (controller, handler) = controller_with_handler();
        handler.borrow_mut().busy = true;
        let updates = Rc::new(Cell::new(0));
        let sink = Rc::clone(&updates);
        controller.add_update_listener(move |door| {
            assert_eq!(door.state(), DoorState::Unanswered);
            sink.set(sink.get() + 1);
        });

        assert!(!controller.doors()[0].try_move_to());

        assert_eq!(controller.state(), DoorState::Unanswered);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn missing_handler_keeps_door_closed() {
        let controller = DoorController::new(
            DoorId(3),
            TriviaQuestion::new("q", "a", QuestionType::ShortAnswer),
        );

        assert!(!controller.doors()[0].try_move_to());
        assert_eq!(controller.state(), DoorState::Unanswered);
    }

    #[test]
    fn removing_listeners_reports_membership() {
        let (controller, _) = controller_with_handler();
        let id = controller.add_update_listener(|_| {});

        assert!(controller.remove_update_listener(id));
        assert!(!controller.remove_update_listener(id));
    }

    #[test]
    fn listener_can_remove_itself_during_notification() {
        let (controller, handler) = controller_with_handler();
        let calls = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));
        let removed = Rc::new(Cell::new(None));

        let (sink, slot, outcome) = (Rc::clone(&calls), Rc::clone(&own_id), Rc::clone(&removed));
        let id = controller.add_update_listener(move |door| {
            sink.set(sink.get() + 1);
            if let Some(id) = slot.get() {
                outcome.set(Some(door.remove_update_listener(id)));
            }
        });
        own_id.set(Some(id));

        assert!(!controller.doors()[0].try_move_to());
        resolve(&handler, QuestionResult::Correct);

        assert_eq!(calls.get(), 1);
        assert_eq!(removed.get(), Some(true));
        assert!(!controller.remove_update_listener(id));
    }

    #[test]
    fn tiles_outliving_controller_read_locked() {
        let (controller, _) = controller_with_handler();
        let tile = controller.doors()[0].clone();
        drop(controller);

        assert_eq!(tile.state(), DoorState::Locked);
        assert!(!tile.try_move_to());
    }
}
