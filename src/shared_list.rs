use std::cell::{RefCell, RefMut};
use std::rc::Rc;

/// A persistent singly linked list. `push` never touches the list it is called
/// on, so many lists can share one tail. Each element sits in a `RefCell` so the
/// head of any list can still be updated in place.
#[derive(Debug)]
pub struct SharedList<T> {
    head: Link<T>,
}

type Link<T> = Option<Rc<Node<T>>>;

#[derive(Debug)]
struct Node<T> {
    elem: RefCell<T>,
    next: Link<T>,
}

impl<T> Clone for SharedList<T> {
    fn clone(&self) -> SharedList<T> {
        SharedList {
            head: self.head.clone(),
        }
    }
}

impl<T> SharedList<T> {
    pub fn new() -> Self {
        SharedList { head: None }
    }

    pub fn push(&self, elem: T) -> SharedList<T> {
        SharedList {
            head: Some(Rc::new(Node {
                elem: RefCell::new(elem),
                next: self.head.clone(),
            })),
        }
    }

    pub fn peek_mut(&self) -> Option<RefMut<T>> {
        self.head.as_ref().map(|node| node.elem.borrow_mut())
    }

    /// Walks from the head towards the tail and returns the first `Some`.
    pub fn find_map<U, F>(&self, mut f: F) -> Option<U>
    where
        F: FnMut(&T) -> Option<U>,
    {
        let mut link = self.head.as_ref();
        while let Some(node) = link {
            let elem = node.elem.borrow();
            if let Some(found) = f(&*elem) {
                return Some(found);
            }
            link = node.next.as_ref();
        }
        None
    }
}

// Unlinks iteratively so dropping a long chain cannot overflow the stack.
impl<T> Drop for SharedList<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(node) = link {
            match Rc::try_unwrap(node) {
                Ok(mut node) => link = node.next.take(),
                Err(_) => break,
            }
        }
    }
}
