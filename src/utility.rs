macro_rules! rc {
	($x:expr) => {
		::std::rc::Rc::new($x)
	};
}

pub(crate) use rc;
