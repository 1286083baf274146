macro_rules! notation {
	// rules used for writing
	(write, $w:ident, $v:expr, Vec<u8> [$iat:tt]) => {
		notation!(write_len, $w, $v, $iat);
		std::io::Write::write_all($w, $v)?;
	};
	(write, $w:ident, $v:expr, Vec<$it:tt> [$iat:tt]) => {
		notation!(write_len, $w, $v, $iat);
		for i in $v {
			notation!(write, $w, i, $it);
		}
	};
	(write_len, $w:ident, $v:expr, $iat:tt) => {
		let len = <$iat>::try_from($v.len())
			.map_err(|_| std::io::Error::other(format!("length {} doesn't fit into {}", $v.len(), stringify!($iat))))?;
		notation!(write, $w, len, $iat);
	};
	(write, $w:ident, $v:expr, u8) => { std::io::Write::write_all($w, &$v.to_be_bytes())?; };
	(write, $w:ident, $v:expr, u16) => { std::io::Write::write_all($w, &$v.to_be_bytes())?; };
	(write, $w:ident, $v:expr, u32) => { std::io::Write::write_all($w, &$v.to_be_bytes())?; };
	(write, $w:ident, $v:expr, $_t:ty) => { $v.jvms_write($w)?; };
	// rules used for reading
	(read, $r:ident, Vec<u8> [$iat:tt]) => {{
		let len = notation!(read, $r, $iat);
		let mut vec = vec![0u8; len as usize];
		std::io::Read::read_exact($r, &mut vec)?;
		vec
	}};
	(read, $r:ident, Vec<$it:tt> [$iat:tt]) => {{
		let len = notation!(read, $r, $iat);
		let mut vec = Vec::with_capacity(len as usize);
		for _ in 0..len {
			vec.push(notation!(read, $r, $it));
		}
		vec
	}};
	(read, $r:ident, u8) => {{
		let mut buf = [0u8; 1];
		std::io::Read::read_exact($r, &mut buf)?;
		u8::from_be_bytes(buf)
	}};
	(read, $r:ident, u16) => {{
		let mut buf = [0u8; 2];
		std::io::Read::read_exact($r, &mut buf)?;
		u16::from_be_bytes(buf)
	}};
	(read, $r:ident, u32) => {{
		let mut buf = [0u8; 4];
		std::io::Read::read_exact($r, &mut buf)?;
		u32::from_be_bytes(buf)
	}};
	(read, $r:ident, $t:ty) => {
		<$t>::jvms_read($r)?
	};
	// rules used for checking read constants
	(check, $c:ident, $cv:expr) => {
		if $c != $cv {
			return Err(std::io::Error::other(format!("unexpected constant value: expected 0x{:x?}, got 0x{:x?} for `{}`", $cv, $c, stringify!($c))));
		}
	};
	// rules used for calculating lengths
	(len, $v:expr, Vec<u8> [$iat:tt]) => {
		notation!(len, $v, $iat) + $v.len() as u32
	};
	(len, $v:expr, Vec<$it:tt> [$iat:tt]) => {{
		let mut len = notation!(len, $v, $iat);
		for _i in $v {
			len += notation!(len, _i, $it);
		}
		len
	}};
	(len, $_v:expr, u8) => { 1 };
	(len, $_v:expr, u16) => { 2 };
	(len, $_v:expr, u32) => { 4 };
	(len, $v:expr, $_t:ty) => { $v.jvms_len() };
	// rules actually used in the definition of things
	(
		struct $n:ident {
			$( const $c_0:ident: $ct_0:ident = $cv_0:expr, )*
			$(
				mut $i:ident: $it:ident $( <$iit:tt> [$iat:tt] )?,
			)*
		}
	) => {
		#[derive(Debug, Clone, PartialEq)]
		pub struct $n {
			$( pub $i: $it $(<$iit>)?, )*
		}

		impl $n {
			pub(crate) fn jvms_write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
				$( notation!(write, writer, $cv_0 as $ct_0, $ct_0); )*
				$( notation!(write, writer, &self.$i, $it $( <$iit> [$iat] )?); )*
				Ok(())
			}

			pub(crate) fn jvms_read(reader: &mut impl std::io::Read) -> std::io::Result<$n> {
				$( let $c_0 = notation!(read, reader, $ct_0); notation!(check, $c_0, $cv_0); )*
				$( let $i = notation!(read, reader, $it $( <$iit> [$iat] )?); )*
				Ok($n {
					$( $i, )*
				})
			}

			pub(crate) fn jvms_len(&self) -> u32 {
				0
				$( + notation!(len, $cv_0, $ct_0) )*
				$( + notation!(len, &self.$i, $it $( <$iit> [$iat] )?) )*
			}
		}
	};
	(
		enum $n:ident {
			$t:ident: $tt:ident,
			$( $v:ident {
				= $tv:expr => $tm:pat,
				$( mut $i:ident: $it:ident $( <$iit:tt> [$iat:tt] )?, )*
			}, )*
			_ { $fm:pat => $f:expr, },
		}
	) => {
		#[derive(Debug, Clone, PartialEq)]
		pub enum $n {
			$( $v {
				$( $i: $it $(<$iit>)?, )*
			}, )*
		}

		impl $n {
			pub(crate) fn jvms_write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
				match self {
					$( $n::$v { $( $i, )* } => {
						notation!(write, writer, $tv as $tt, $tt);
						$( notation!(write, writer, $i, $it $( <$iit> [$iat] )?); )*
					}, )*
				}
				Ok(())
			}

			pub(crate) fn jvms_read(reader: &mut impl std::io::Read) -> std::io::Result<$n> {
				let $t = notation!(read, reader, $tt);
				match $t {
					$( $tm => {
						$( let $i = notation!(read, reader, $it $( <$iit> [$iat] )?); )*
						Ok($n::$v {
							$( $i, )*
						})
					}, )*
					$fm => $f,
				}
			}

			pub(crate) fn jvms_len(&self) -> u32 {
				match self {
					$( $n::$v { $( $i, )* } => {
						notation!(len, $tv, $tt)
						$( + { let _i = $i; notation!(len, _i, $it $( <$iit> [$iat] )?) } )*
					}, )*
				}
			}
		}
	}
}

pub(super) use notation;
