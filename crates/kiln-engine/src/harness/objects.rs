use std::fmt;

/// Identifier of a device object owned by a scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of device object, in the vocabulary used by teardown logs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Buffer,
    VertexArray,
    Program,
}

/// A device object that can be given back to the device.
///
/// `release` consumes the object, so a released handle cannot be used again.
pub trait Release {
    const KIND: ObjectKind;

    fn release(self);
}

/// Record of released objects, in release order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReleaseLog {
    released: Vec<(ObjectKind, ObjectId)>,
}

impl ReleaseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(ObjectKind, ObjectId)] {
        &self.released
    }

    pub fn kinds(&self) -> Vec<ObjectKind> {
        self.released.iter().map(|(k, _)| *k).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.released.is_empty()
    }

    fn push(&mut self, kind: ObjectKind, id: ObjectId) {
        self.released.push((kind, id));
    }
}

/// Owner of at most one live device object under a fixed id.
///
/// Lookups through a released (or never filled) slot return `None`.
#[derive(Debug)]
pub struct ObjectSlot<T> {
    id: ObjectId,
    object: Option<T>,
}

impl<T: Release> ObjectSlot<T> {
    pub const fn empty(id: ObjectId) -> Self {
        Self { id, object: None }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Stores `object`, releasing whatever the slot held before.
    pub fn fill(&mut self, object: T) {
        if let Some(old) = self.object.replace(object) {
            log::warn!("{:?} {} replaced while live", T::KIND, self.id);
            old.release();
        }
    }

    pub fn is_live(&self) -> bool {
        self.object.is_some()
    }

    /// Returns the object if `id` names this slot and it is still live.
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        if id == self.id {
            self.object.as_ref()
        } else {
            None
        }
    }

    /// Releases the object. Returns `false` if the slot was already empty.
    pub fn release(&mut self, log: &mut ReleaseLog) -> bool {
        let Some(object) = self.object.take() else {
            return false;
        };
        object.release();
        log.push(T::KIND, self.id);
        log::debug!("released {:?} {}", T::KIND, self.id);
        true
    }
}

/// The device objects of a drawing scene: one buffer, the vertex-array state
/// reading from it, and the program drawing with it.
///
/// Teardown order is buffer, vertex array, program.
#[derive(Debug)]
pub struct DeviceObjects<B, V, P> {
    pub buffer: ObjectSlot<B>,
    pub vertex_array: ObjectSlot<V>,
    pub program: ObjectSlot<P>,
}

impl<B: Release, V: Release, P: Release> DeviceObjects<B, V, P> {
    pub const BUFFER: ObjectId = ObjectId(1);
    pub const VERTEX_ARRAY: ObjectId = ObjectId(1);
    pub const PROGRAM: ObjectId = ObjectId(1);

    pub const fn new() -> Self {
        Self {
            buffer: ObjectSlot::empty(Self::BUFFER),
            vertex_array: ObjectSlot::empty(Self::VERTEX_ARRAY),
            program: ObjectSlot::empty(Self::PROGRAM),
        }
    }

    /// Releases every live object in teardown order. Safe to call again; a
    /// second call releases nothing.
    pub fn release_all(&mut self, log: &mut ReleaseLog) {
        self.buffer.release(log);
        self.vertex_array.release(log);
        self.program.release(log);
    }
}

impl<B: Release, V: Release, P: Release> Default for DeviceObjects<B, V, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<&'static str>>>;

    struct FakeBuffer(Trace);
    struct FakeVertexArray(Trace);
    struct FakeProgram(Trace);

    impl Release for FakeBuffer {
        const KIND: ObjectKind = ObjectKind::Buffer;
        fn release(self) {
            self.0.borrow_mut().push("buffer");
        }
    }

    impl Release for FakeVertexArray {
        const KIND: ObjectKind = ObjectKind::VertexArray;
        fn release(self) {
            self.0.borrow_mut().push("vertex_array");
        }
    }

    impl Release for FakeProgram {
        const KIND: ObjectKind = ObjectKind::Program;
        fn release(self) {
            self.0.borrow_mut().push("program");
        }
    }

    type Objects = DeviceObjects<FakeBuffer, FakeVertexArray, FakeProgram>;

    fn filled(trace: &Trace) -> Objects {
        let mut objects = Objects::new();
        objects.program.fill(FakeProgram(trace.clone()));
        objects.vertex_array.fill(FakeVertexArray(trace.clone()));
        objects.buffer.fill(FakeBuffer(trace.clone()));
        objects
    }

    // ── teardown order ────────────────────────────────────────────────────

    #[test]
    fn release_all_follows_teardown_order() {
        let trace = Trace::default();
        let mut objects = filled(&trace);
        let mut log = ReleaseLog::new();

        objects.release_all(&mut log);

        assert_eq!(*trace.borrow(), vec!["buffer", "vertex_array", "program"]);
        assert_eq!(
            log.kinds(),
            vec![ObjectKind::Buffer, ObjectKind::VertexArray, ObjectKind::Program]
        );
    }

    #[test]
    fn release_all_twice_releases_once() {
        let trace = Trace::default();
        let mut objects = filled(&trace);
        let mut log = ReleaseLog::new();

        objects.release_all(&mut log);
        objects.release_all(&mut log);

        assert_eq!(trace.borrow().len(), 3);
        assert_eq!(log.entries().len(), 3);
    }

    #[test]
    fn lookups_after_release_return_none() {
        let trace = Trace::default();
        let mut objects = filled(&trace);
        assert!(objects.buffer.get(Objects::BUFFER).is_some());

        objects.release_all(&mut ReleaseLog::new());

        assert!(objects.buffer.get(Objects::BUFFER).is_none());
        assert!(objects.vertex_array.get(Objects::VERTEX_ARRAY).is_none());
        assert!(objects.program.get(Objects::PROGRAM).is_none());
    }

    #[test]
    fn empty_objects_release_nothing() {
        let mut objects = Objects::new();
        let mut log = ReleaseLog::new();
        objects.release_all(&mut log);
        assert!(log.is_empty());
    }

    // ── slots ─────────────────────────────────────────────────────────────

    #[test]
    fn wrong_id_does_not_resolve() {
        let trace = Trace::default();
        let mut slot = ObjectSlot::empty(ObjectId(1));
        slot.fill(FakeBuffer(trace));
        assert!(slot.get(ObjectId(2)).is_none());
        assert!(slot.get(ObjectId(1)).is_some());
    }

    #[test]
    fn refill_releases_previous_object() {
        let trace = Trace::default();
        let mut slot = ObjectSlot::empty(ObjectId(1));
        slot.fill(FakeBuffer(trace.clone()));
        slot.fill(FakeBuffer(trace.clone()));
        assert_eq!(*trace.borrow(), vec!["buffer"]);
        assert!(slot.is_live());
    }
}
